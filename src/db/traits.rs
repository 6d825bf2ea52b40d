//! Record store abstraction
//!
//! This module provides the `UserRepository` trait, the only way the
//! authentication core reaches user records. Lookups are typed by the
//! attribute they search on instead of going through ad-hoc queries.
//!
//! # Example
//!
//! ```rust,ignore
//! use sample_auth::db::UserStoreProvider;
//!
//! // In-memory SQLite (default for development/testing)
//! let users = UserStoreProvider::Memory.create_repository().await?;
//!
//! // File-based SQLite
//! let users = UserStoreProvider::SQLite { path: "data/users.db".into() }
//!     .create_repository()
//!     .await?;
//! ```

use crate::types::{Result, User};
use async_trait::async_trait;
use std::sync::Arc;

/// Record store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserStoreProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
}

impl UserStoreProvider {
    /// Builds a provider from a `database.url` value.
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() || url == ":memory:" {
            UserStoreProvider::Memory
        } else {
            UserStoreProvider::SQLite {
                path: url.to_string(),
            }
        }
    }

    /// Create a repository from this provider configuration
    pub async fn create_repository(&self) -> Result<Arc<dyn UserRepository>> {
        match self {
            UserStoreProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            UserStoreProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
        }
    }
}

/// Typed access to persisted users.
///
/// Implementations must make each write an atomic single-row operation;
/// the core does no locking of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by (already lowercased) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get a user by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Get the user whose stored remember digest equals `digest`
    async fn find_by_remember_digest(&self, digest: &str) -> Result<Option<User>>;

    /// Persist a new user. Fails with `AppError::Conflict` if the email is taken.
    async fn insert(&self, user: &User) -> Result<()>;

    /// Overwrite the remember digest of an existing user
    async fn update_remember_digest(&self, id: &str, digest: &str) -> Result<()>;

    /// Toggle the admin flag. Not used by the authentication core itself.
    async fn set_admin(&self, id: &str, admin: bool) -> Result<()>;
}

//! # sample-auth
//!
//! Password sign-in and persistent "remember me" sessions for the sample
//! social app, with an axum adapter.
//!
//! ## Overview
//!
//! sample-auth can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `sample-auth-server` binary
//! 2. **As a library** - Call the auth core from your own handlers
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use sample_auth::{AppConfig, AppState, db::UserStoreProvider, users::{self, SignUp}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let store = UserStoreProvider::Memory.create_repository().await?;
//!     let state = AppState::new(config, store);
//!
//!     let sign_up = SignUp::new("Example User", "USER@Example.com", "foobar", "foobar");
//!     let user = users::register(state.users.as_ref(), &sign_up).await?;
//!     assert_eq!(user.email, "user@example.com");
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Token issuing, password checks, sessions and return-to redirects
//! - [`users`] - Sign-up validation and registration
//! - [`db`] - The user record store interface and its backends
//! - [`api`] - REST API handlers and routes
//! - [`types`] - Common types and error handling
//! - [`utils`] - TOML configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Password sign-in and remember-me sessions.
pub mod auth;
/// User record stores.
pub mod db;
/// Core types (users, requests, errors).
#[allow(missing_docs)]
pub mod types;
/// User construction and registration.
#[allow(missing_docs)]
pub mod users;
/// Configuration utilities (TOML).
#[allow(missing_docs)]
pub mod utils;

// Re-export commonly used types
pub use auth::{PasswordAuthenticator, SessionManager, TokenIssuer};
pub use db::{UserRepository, UserStoreProvider};
pub use types::{AppError, Result, User};
pub use utils::toml_config::AppConfig;

use crate::auth::cookies::{jar_from_headers, RememberCookie};
use axum::http::HeaderMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML-based configuration
    pub config: Arc<AppConfig>,
    /// User record store
    pub users: Arc<dyn UserRepository>,
    /// Credential checker
    pub authenticator: PasswordAuthenticator,
}

impl AppState {
    /// Wires the shared pieces together.
    pub fn new(config: AppConfig, users: Arc<dyn UserRepository>) -> Self {
        Self {
            config: Arc::new(config),
            authenticator: PasswordAuthenticator::new(users.clone()),
            users,
        }
    }

    /// A fresh session manager for one request, seeded with its cookies.
    pub fn session_manager(&self, headers: &HeaderMap) -> SessionManager {
        SessionManager::new(
            self.users.clone(),
            RememberCookie::from(&self.config.auth),
            jar_from_headers(headers),
        )
        .rotate_on_sign_out(self.config.auth.rotate_token_on_sign_out)
    }
}

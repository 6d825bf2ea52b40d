//! User record stores.
//!
//! This module provides the record-store side of authentication:
//! - **`UserRepository`**: the typed interface the auth core calls into
//! - **Turso/SQLite**: libsql-backed store (file or in-memory)
//! - **Memory**: a lock-guarded `HashMap`, handy for tests
//!
//! Pick the SQLite backend via `database.url` in `sample-auth.toml`:
//! ```toml
//! [database]
//! url = "./data/users.db"   # or ":memory:"
//! ```

#![allow(missing_docs)]

pub mod memory;
pub mod traits;
pub mod turso;

// Re-exports
pub use memory::MemoryUserStore;
pub use traits::{UserRepository, UserStoreProvider};
pub use turso::TursoClient;

#[cfg(test)]
pub use traits::MockUserRepository;

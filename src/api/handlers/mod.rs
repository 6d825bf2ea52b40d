//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Sign-in and sign-out handlers.
pub mod sessions;
/// Sign-up and user view handlers.
pub mod users;

/// Liveness probe
pub async fn health() -> &'static str {
    "OK"
}

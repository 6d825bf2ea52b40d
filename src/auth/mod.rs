//! Password sign-in and remember-me sessions
//!
//! This module is the authentication core plus the glue that lets an axum
//! application use it.
//!
//! # Module Structure
//!
//! - [`auth::token`](crate::auth::token) - remember token minting and SHA-256 digests
//! - [`auth::password`](crate::auth::password) - Argon2id hashing and credential checks
//! - [`auth::session`](crate::auth::session) - per-request sign-in / current user / sign-out
//! - [`auth::redirect`](crate::auth::redirect) - one-shot return-to locations
//! - [`auth::cookies`](crate::auth::cookies) - remember cookie shape and header plumbing
//! - [`auth::middleware`](crate::auth::middleware) - access filter and `CurrentUser` extractor
//!
//! # Flow
//!
//! ```ignore
//! // POST /signin
//! let Some(user) = authenticator.authenticate(&email, &password).await? else {
//!     return Err(AppError::Auth("Invalid email/password combination".into()));
//! };
//! let mut sessions = state.session_manager(&headers);
//! sessions.sign_in(user).await?;
//! let redirect = redirect_back_or(&session, "/").await?;
//!
//! // any later request
//! let mut sessions = state.session_manager(&headers);
//! if let Some(user) = sessions.current_user().await? { /* ... */ }
//! ```
//!
//! # Security Notes
//!
//! - **Passwords**: Argon2id with a per-hash random salt
//! - **Remember tokens**: 128 bits from the OS RNG; only the SHA-256 digest
//!   is stored, the raw value lives in the client's cookie
//! - **Sign-out**: deletes the cookie; the stored digest is replaced only when
//!   `auth.rotate_token_on_sign_out` is set

/// Remember-cookie construction and `Cookie` / `Set-Cookie` header handling.
pub mod cookies;
/// Access filter and current-user extractor for protected routes.
pub mod middleware;
/// Password hashing and the credential authenticator.
pub mod password;
/// Return-to location tracking.
pub mod redirect;
/// Request-scoped session state machine.
pub mod session;
/// Remember token issuance.
pub mod token;

pub use cookies::RememberCookie;
pub use middleware::{require_signed_in, CurrentUser};
pub use password::PasswordAuthenticator;
pub use redirect::{redirect_back_or, store_location};
pub use session::{SessionManager, SessionState};
pub use token::TokenIssuer;

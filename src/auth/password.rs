use crate::db::UserRepository;
use crate::types::{AppError, Result, User};
use crate::users::normalize_email;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Hashes a password using Argon2id.
///
/// Returns a PHC-formatted hash string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against an Argon2 hash.
///
/// A stored hash that does not parse never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "stored password hash is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Checks submitted credentials against the record store.
///
/// Has no cookie or session side effects; see `SessionManager` for that.
#[derive(Clone)]
pub struct PasswordAuthenticator {
    users: Arc<dyn UserRepository>,
}

impl PasswordAuthenticator {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns the user when `password` matches the one stored for `email`.
    ///
    /// Unknown emails, malformed emails and wrong passwords are all `Ok(None)`.
    /// Only a record-store failure is an error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(email) = normalize_email(email) else {
            debug!("rejecting sign-in with malformed email");
            return Ok(None);
        };

        let Some(user) = self.users.find_by_email(&email).await? else {
            debug!("no user for submitted email");
            return Ok(None);
        };

        if verify_password(password, &user.password_digest) {
            Ok(Some(user))
        } else {
            debug!(user_id = %user.id, "password mismatch");
            Ok(None)
        }
    }
}

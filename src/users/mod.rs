//! User construction and registration.
//!
//! Everything that must happen before a user row is first written lives
//! here as one explicit step: field validation, email normalization,
//! password hashing and seeding the remember digest.

/// Sign-up form and field validation rules.
pub mod validation;

pub use validation::{is_valid_email, normalize_email, SignUp};

use crate::auth::password::hash_password;
use crate::auth::token::TokenIssuer;
use crate::db::UserRepository;
use crate::types::{AppError, Result, User, ValidationErrors};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

fn email_taken() -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add("email", "has already been taken");
    AppError::Validation(errors)
}

/// Builds a persistable user from a validated sign-up.
///
/// The raw remember token minted here is dropped immediately; only its digest
/// is kept, so the column is never blank before the first sign-in.
pub fn build_user(sign_up: &SignUp, tokens: &TokenIssuer) -> Result<User> {
    sign_up.validate()?;

    let email = normalize_email(&sign_up.email).ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is invalid");
        AppError::Validation(errors)
    })?;

    let password_digest = hash_password(&sign_up.password)?;
    let (_, remember_digest) = tokens.mint()?.into_parts();
    let now = Utc::now().timestamp();

    Ok(User {
        id: Uuid::new_v4().to_string(),
        name: sign_up.name.trim().to_string(),
        email,
        password_digest,
        remember_digest,
        admin: false,
        created_at: now,
        updated_at: now,
    })
}

/// Validates, constructs and inserts a new user.
pub async fn register(users: &dyn UserRepository, sign_up: &SignUp) -> Result<User> {
    let user = build_user(sign_up, &TokenIssuer::new())?;

    if users.find_by_email(&user.email).await?.is_some() {
        return Err(email_taken());
    }

    match users.insert(&user).await {
        Ok(()) => {}
        // Lost a race with a concurrent sign-up for the same address.
        Err(AppError::Conflict(_)) => return Err(email_taken()),
        Err(e) => return Err(e),
    }

    info!(user_id = %user.id, "user registered");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryUserStore, MockUserRepository};

    fn sign_up(email: &str) -> SignUp {
        SignUp::new("Example User", email, "foobar", "foobar")
    }

    #[tokio::test]
    async fn test_register_normalizes_and_seeds_digest() {
        let store = MemoryUserStore::new();

        let user = register(&store, &sign_up("USER@Example.com"))
            .await
            .expect("registration should succeed");

        assert_eq!(user.email, "user@example.com");
        assert!(!user.remember_digest.is_empty());
        assert!(user.password_digest.starts_with("$argon2"));
        assert!(!user.is_admin());

        let stored = store
            .find_by_email("user@example.com")
            .await
            .unwrap()
            .expect("user should be persisted");
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn test_register_rejects_email_differing_only_in_case() {
        let store = MemoryUserStore::new();
        register(&store, &sign_up("user@example.com")).await.unwrap();

        let result = register(&store, &sign_up("USER@EXAMPLE.COM")).await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.on("email"), ["has already been taken".to_string()]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_register_invalid_sign_up_persists_nothing() {
        let store = MemoryUserStore::new();
        let bad = SignUp::new("", "user@example.com", "foo", "bar");

        let result = register(&store, &bad).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_register_maps_insert_conflict() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_email().returning(|_| Ok(None));
        mock.expect_insert()
            .returning(|_| Err(AppError::Conflict("taken".to_string())));

        let result = register(&mock, &sign_up("user@example.com")).await;

        match result {
            Err(AppError::Validation(errors)) => assert!(!errors.on("email").is_empty()),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_user_digest_is_not_a_raw_token() {
        let tokens = TokenIssuer::new();
        let user = build_user(&sign_up("user@example.com"), &tokens).unwrap();

        assert_eq!(user.remember_digest.len(), crate::auth::token::DIGEST_LEN);
        let raw = tokens.new_token().unwrap();
        assert_ne!(user.remember_digest, raw);
    }
}

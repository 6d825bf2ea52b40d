//! Shared fixtures for integration tests.

#![allow(dead_code)]

use sample_auth::{
    db::{TursoClient, UserRepository},
    types::User,
    users::{self, SignUp},
};
use std::sync::Arc;
use tower_sessions::cookie::{Cookie, CookieJar};

pub const PASSWORD: &str = "foobar";

/// A fresh in-memory SQLite store.
pub async fn memory_store() -> Arc<dyn UserRepository> {
    Arc::new(
        TursoClient::new_memory()
            .await
            .expect("Failed to create in-memory database"),
    )
}

pub fn example_sign_up(email: &str) -> SignUp {
    SignUp::new("Example User", email, PASSWORD, PASSWORD)
}

/// Registers a user with the default password.
pub async fn create_user(store: &dyn UserRepository, email: &str) -> User {
    users::register(store, &example_sign_up(email))
        .await
        .expect("registration should succeed")
}

/// A jar as it would arrive on a request carrying `remember_token=value`.
pub fn request_jar(value: &str) -> CookieJar {
    let mut jar = CookieJar::new();
    jar.add_original(Cookie::new("remember_token", value.to_string()));
    jar
}

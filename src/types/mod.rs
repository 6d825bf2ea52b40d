use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============= User Types =============

/// A user record as held by the record store.
///
/// The core only reads these fields and writes `remember_digest`; everything
/// else is owned by registration and the store itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Always stored lowercase.
    pub email: String,
    /// Argon2 PHC string; never serialized into responses.
    #[serde(skip_serializing, default)]
    pub password_digest: String,
    /// SHA-256 hex digest of the most recently issued remember token.
    #[serde(skip_serializing, default)]
    pub remember_digest: String,
    #[serde(default)]
    pub admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

/// Public projection of a user returned by the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            admin: user.admin,
        }
    }
}

// ============= Request Types =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

// ============= Validation Types =============

/// Field-level violations attached to a rejected write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for `field`, empty if the field is valid.
    pub fn on(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{} {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Session(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, body) = match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({
                    "error": "Validation failed",
                    "errors": errors,
                }),
            ),
            AppError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, serde_json::json!({ "error": msg })),
            AppError::Auth(msg) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": msg }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::Session(msg) | AppError::Config(msg) | AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_validation_errors_collect_per_field() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("email", "can't be blank");
        errors.add("email", "is invalid");
        errors.add("name", "can't be blank");

        assert_eq!(errors.on("email").len(), 2);
        assert_eq!(errors.on("name"), ["can't be blank".to_string()]);
        assert!(errors.on("password").is_empty());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "name"]);
        assert_eq!(
            errors.to_string(),
            "email can't be blank, email is invalid, name can't be blank"
        );
    }

    #[test]
    fn test_user_serialization_hides_digests() {
        let user = User {
            id: "user-1".to_string(),
            name: "Example User".to_string(),
            email: "user@example.com".to_string(),
            password_digest: "$argon2id$secret".to_string(),
            remember_digest: "abc123".to_string(),
            admin: false,
            created_at: 0,
            updated_at: 0,
        };

        let json = serde_json::to_value(&user).expect("should serialize");
        assert!(json.get("password_digest").is_none());
        assert!(json.get("remember_digest").is_none());
        assert_eq!(json["email"], "user@example.com");
    }

    #[test]
    fn test_error_status_codes() {
        let validation = AppError::Validation(ValidationErrors::new()).into_response();
        assert_eq!(
            validation.status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );

        let auth = AppError::Auth("nope".to_string()).into_response();
        assert_eq!(auth.status(), axum::http::StatusCode::UNAUTHORIZED);

        let db = AppError::Database("down".to_string()).into_response();
        assert_eq!(db.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}

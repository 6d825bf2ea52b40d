use crate::types::ValidationErrors;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const NAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;

// `\w` would admit non-ASCII letters, so the class is spelled out.
static VALID_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_+\-.]+@[a-z0-9\-.]+\.[a-z]+$").expect("email pattern is valid")
});

/// Returns true if `email` has the `local@domain.tld` shape we accept.
pub fn is_valid_email(email: &str) -> bool {
    VALID_EMAIL.is_match(email)
}

/// Trims and lowercases `email`, or `None` if it is not a valid address.
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim();
    is_valid_email(email).then(|| email.to_lowercase())
}

/// Sign-up form as submitted by a client.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl SignUp {
    pub fn new(name: &str, email: &str, password: &str, password_confirmation: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: password_confirmation.to_string(),
        }
    }

    /// Collects every field violation rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "can't be blank");
        } else if self.name.chars().count() > NAME_MAX_CHARS {
            errors.add(
                "name",
                format!("is too long (maximum is {} characters)", NAME_MAX_CHARS),
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "can't be blank");
        } else if !is_valid_email(email) {
            errors.add("email", "is invalid");
        }

        if self.password.trim().is_empty() {
            errors.add("password", "can't be blank");
        } else if self.password.chars().count() < PASSWORD_MIN_CHARS {
            errors.add(
                "password",
                format!("is too short (minimum is {} characters)", PASSWORD_MIN_CHARS),
            );
        }

        if self.password_confirmation != self.password {
            errors.add("password_confirmation", "doesn't match Password");
        }

        errors.into_result()
    }
}

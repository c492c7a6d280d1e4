//! User accounts.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{Email, UserId, Username};
use crate::validation::{Schema, rule};

/// A registered user.
///
/// The password hash never leaves the server: it is skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Registration request body.
#[derive(Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(length(
        min = 8,
        code = "too_small",
        message = "Password must be at least 8 characters"
    ))]
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Schema for NewUser {
    const NAME: &'static str = "user";
    const REQUIRED: &'static [&'static str] = &["username", "email", "password"];
}

/// A validated user ready to be stored, with the password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
}

impl CreateUser {
    /// Build the stored record.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    Username::parse(username)
        .map(|_| ())
        .map_err(|e| rule("invalid_string", e.to_string()))
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    Email::parse(email)
        .map(|_| ())
        .map_err(|e| rule("invalid_string", e.to_string()))
}

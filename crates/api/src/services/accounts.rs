//! User registration.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use tranquil_core::{CreateUser, Email, EmailError, NewUser, User, Username, UsernameError};

use crate::db::{RepositoryError, Storage};
use crate::error::AppError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Username already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// Email already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidUsername(_) | AccountError::InvalidEmail(_) => {
                Self::BadRequest(err.to_string())
            }
            AccountError::UsernameTaken => Self::Conflict("Username already taken".to_string()),
            AccountError::EmailTaken => Self::Conflict("Email already registered".to_string()),
            AccountError::Repository(source) => Self::Storage {
                context: "Failed to create user",
                source,
            },
            AccountError::PasswordHash => Self::Internal(err.to_string()),
        }
    }
}

/// Account operations over any storage backend.
pub struct AccountService<'a> {
    storage: &'a dyn Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Register a new user.
    ///
    /// The password is hashed with Argon2id before it reaches storage; the
    /// plaintext is never stored.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UsernameTaken` or `AccountError::EmailTaken` if
    /// either is already registered, `AccountError::InvalidUsername` or
    /// `AccountError::InvalidEmail` if the fields are malformed.
    pub async fn register(&self, new: NewUser) -> Result<User, AccountError> {
        let username = Username::parse(&new.username)?;
        let email = Email::parse(&new.email)?;

        if self
            .storage
            .get_user_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::UsernameTaken);
        }
        if self
            .storage
            .get_user_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = hash_password(&new.password)?;
        let user = self
            .storage
            .create_user(CreateUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}

use thiserror::Error;

/// Error for UserId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID is required")]
    Empty,

    #[error("User ID may only contain letters, numbers and underscores")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email address")]
    InvalidFormat(String),
}

/// Error for registration and login input validation.
///
/// Rules run in a fixed order and the first failure is reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All required fields must be filled")]
    MissingRegistrationFields,

    #[error("User ID and password are required")]
    MissingCredentials,

    #[error(transparent)]
    UserId(#[from] UserIdError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Password(#[from] auth::PasswordPolicyError),
}

/// Error for reads and writes against the session store
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Session store read failed: {0}")]
    ReadFailed(String),

    #[error("Session store write failed: {0}")]
    WriteFailed(String),

    #[error("Session destroy failed: {0}")]
    DestroyFailed(String),
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("User ID is already taken")]
    UserIdTaken(String),

    #[error("Invalid userId or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Whether the error comes from infrastructure rather than caller input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Password(_)
                | AuthError::Session(_)
                | AuthError::DatabaseError(_)
                | AuthError::Unknown(_)
        )
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Unknown(format!("Blocking task failed: {}", err))
    }
}

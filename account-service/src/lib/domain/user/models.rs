use std::fmt;
use std::str::FromStr;

use auth::PasswordPolicy;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

/// User aggregate entity.
///
/// Represents a registered account. Never updated after creation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User identifier chosen by the registrant.
///
/// Non-empty and restricted to ASCII letters, digits and underscore.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a new validated user ID.
    ///
    /// # Arguments
    /// * `user_id` - Raw identifier string
    ///
    /// # Errors
    /// * `Empty` - Identifier is empty
    /// * `InvalidCharacters` - Contains characters outside `[A-Za-z0-9_]`
    pub fn new(user_id: String) -> Result<Self, UserIdError> {
        if user_id.is_empty() {
            return Err(UserIdError::Empty);
        }

        if user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            Ok(Self(user_id))
        } else {
            Err(UserIdError::InvalidCharacters)
        }
    }

    /// Get user ID as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Accepts the basic `local@domain.tld` shape: no whitespace, a single
/// `@`, and a dotted domain, on top of the RFC 5322 parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not have the `local@domain.tld` shape
    pub fn new(email: String) -> Result<Self, EmailError> {
        Self::check_shape(&email)?;

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    fn check_shape(email: &str) -> Result<(), EmailError> {
        if email.chars().any(char::is_whitespace) {
            return Err(EmailError::InvalidFormat(
                "contains whitespace".to_string(),
            ));
        }

        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| EmailError::InvalidFormat("missing '@'".to_string()))?;

        if local.is_empty() || domain.contains('@') {
            return Err(EmailError::InvalidFormat(
                "malformed local part".to_string(),
            ));
        }

        let (host, tld) = domain
            .rsplit_once('.')
            .ok_or_else(|| EmailError::InvalidFormat("domain has no dot".to_string()))?;

        if host.is_empty() || tld.is_empty() {
            return Err(EmailError::InvalidFormat("malformed domain".to_string()));
        }

        Ok(())
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Logical identity carried by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub user_name: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.as_str().to_string(),
            user_name: user.name.clone(),
        }
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub user_id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub password: String,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// Identifier, name, email and phone are trimmed; the password is
    /// taken verbatim. Rules are applied in order and the first failure
    /// wins: required fields, identifier characters, email shape,
    /// password length. An empty phone counts as absent.
    ///
    /// # Errors
    /// * `MissingRegistrationFields` - A required field is empty
    /// * `UserId` - Identifier has invalid characters
    /// * `Email` - Email is malformed
    /// * `Password` - Password is too short
    pub fn new(
        user_id: &str,
        name: &str,
        email: &str,
        phone: Option<&str>,
        password: &str,
    ) -> Result<Self, ValidationError> {
        let user_id = user_id.trim();
        let name = name.trim();
        let email = email.trim();

        if user_id.is_empty() || name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingRegistrationFields);
        }

        let user_id = UserId::new(user_id.to_string())?;
        let email = EmailAddress::new(email.to_string())?;
        PasswordPolicy::default().check(password)?;

        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(Self {
            user_id,
            name: name.to_string(),
            email,
            phone,
            password: password.to_string(),
        })
    }
}

/// Command to log in with raw credentials
#[derive(Debug)]
pub struct LoginCommand {
    pub user_id: String,
    pub password: String,
}

impl LoginCommand {
    /// Construct a login command.
    ///
    /// The identifier is not checked against the registration rules, so
    /// a malformed one falls through to the generic credential failure.
    ///
    /// # Errors
    /// * `MissingCredentials` - Identifier or password is empty
    pub fn new(user_id: &str, password: &str) -> Result<Self, ValidationError> {
        let user_id = user_id.trim();
        if user_id.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }

        Ok(Self {
            user_id: user_id.to_string(),
            password: password.to_string(),
        })
    }
}

/// Outcome of a successful registration.
///
/// The user row is the durable part; `logged_in` is false when the
/// auto-login session could not be written.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub logged_in: bool,
}

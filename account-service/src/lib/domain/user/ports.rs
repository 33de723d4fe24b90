use async_trait::async_trait;

use crate::domain::user::models::Identity;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::SessionError;

/// Port for account domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and log it in.
    ///
    /// # Arguments
    /// * `command` - Validated registration fields
    /// * `session` - Session of the current request
    ///
    /// # Returns
    /// Registration with the created user and whether the session was established
    ///
    /// # Errors
    /// * `UserIdTaken` - Identifier is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(
        &self,
        command: RegisterCommand,
        session: &dyn SessionPort,
    ) -> Result<Registration, AuthError>;

    /// Verify credentials and bind the session to the user.
    ///
    /// # Arguments
    /// * `command` - Identifier and password
    /// * `session` - Session of the current request
    ///
    /// # Returns
    /// The authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    /// * `Session` - Session could not be written
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand, session: &dyn SessionPort)
        -> Result<User, AuthError>;

    /// Destroy the current session. A request without a session is a no-op.
    ///
    /// # Errors
    /// * `Session` - Session store delete failed
    async fn logout(&self, session: &dyn SessionPort) -> Result<(), AuthError>;

    /// Report the identity carried by the session, if any. Never fails.
    async fn who_am_i(&self, session: &dyn SessionPort) -> Option<Identity>;

    /// Retrieve the stored account for an identifier.
    ///
    /// # Errors
    /// * `NotFound` - No account with this identifier
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, user_id: &UserId) -> Result<User, AuthError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Persist new user to storage.
    ///
    /// Uniqueness of the identifier is enforced by the store itself.
    ///
    /// # Errors
    /// * `UserIdTaken` - Identifier is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user: User) -> Result<User, AuthError>;
}

/// Access to the logical fields of the current request's session.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Bind the session to an identity under a fresh session id.
    async fn establish(&self, identity: &Identity) -> Result<(), SessionError>;

    /// Read the identity stored in the session.
    async fn identity(&self) -> Result<Option<Identity>, SessionError>;

    /// Delete the session from the store and expire the cookie.
    async fn destroy(&self) -> Result<(), SessionError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::Identity;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::SessionPort;
use crate::user::ports::UserRepository;

const DUMMY_PASSWORD: &str = "account-service-dummy-password";

/// Domain service implementation for account operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
    /// Verified against when the user is unknown, so every failed login
    /// costs one Argon2 verification.
    dummy_hash: Option<String>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `password_hasher` - Hasher configured with the deployment's cost parameters
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(repository: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        let dummy_hash = match password_hasher.hash(DUMMY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to prepare dummy password hash");
                None
            }
        };

        Self {
            repository,
            password_hasher,
            dummy_hash,
        }
    }

    // Argon2 is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.password_hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await??;
        Ok(is_valid)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(
        &self,
        command: RegisterCommand,
        session: &dyn SessionPort,
    ) -> Result<Registration, AuthError> {
        // Fast path only; the insert below is what enforces uniqueness
        if self.repository.find_by_id(&command.user_id).await?.is_some() {
            return Err(AuthError::UserIdTaken(command.user_id.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: command.user_id,
            name: command.name,
            email: command.email,
            phone: command.phone,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.insert(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        let logged_in = match session.establish(&Identity::from(&created_user)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    user_id = %created_user.id,
                    error = %e,
                    "Failed to establish session after registration"
                );
                false
            }
        };

        Ok(Registration {
            user: created_user,
            logged_in,
        })
    }

    async fn login(
        &self,
        command: LoginCommand,
        session: &dyn SessionPort,
    ) -> Result<User, AuthError> {
        let user = match UserId::new(command.user_id) {
            Ok(user_id) => self.repository.find_by_id(&user_id).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            if let Some(dummy_hash) = self.dummy_hash.clone() {
                self.verify_password(command.password, dummy_hash).await?;
            }
            tracing::debug!("Login rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let is_valid = self
            .verify_password(command.password, user.password_hash.clone())
            .await?;

        if !is_valid {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        session.establish(&Identity::from(&user)).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(user)
    }

    async fn logout(&self, session: &dyn SessionPort) -> Result<(), AuthError> {
        session.destroy().await?;
        Ok(())
    }

    async fn who_am_i(&self, session: &dyn SessionPort) -> Option<Identity> {
        match session.identity().await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "Session read failed, treating as logged out");
                None
            }
        }
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound(user_id.to_string()))
    }
}

use async_trait::async_trait;
use tower_sessions::Session;

use crate::domain::user::models::Identity;
use crate::domain::user::ports::SessionPort;
use crate::user::errors::SessionError;

/// Session key holding the logged-in user's identifier.
pub const USER_ID_KEY: &str = "user_id";
/// Session key holding the logged-in user's display name.
pub const USER_NAME_KEY: &str = "user_name";

/// [`SessionPort`] over the cookie session of the current request.
pub struct CookieSession {
    session: Session,
}

impl CookieSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    async fn write_identity(
        &self,
        identity: &Identity,
    ) -> Result<(), tower_sessions::session::Error> {
        // A pre-login session id must never become an authenticated one
        self.session.cycle_id().await?;
        self.session.insert(USER_ID_KEY, &identity.user_id).await?;
        self.session.insert(USER_NAME_KEY, &identity.user_name).await?;
        self.session.save().await
    }
}

#[async_trait]
impl SessionPort for CookieSession {
    async fn establish(&self, identity: &Identity) -> Result<(), SessionError> {
        if let Err(e) = self.write_identity(identity).await {
            // Empty the in-memory record so the session layer neither
            // retries the write nor hands out a cookie for it
            self.session.clear().await;
            return Err(SessionError::WriteFailed(e.to_string()));
        }
        Ok(())
    }

    async fn identity(&self) -> Result<Option<Identity>, SessionError> {
        let user_id: Option<String> = self
            .session
            .get(USER_ID_KEY)
            .await
            .map_err(|e| SessionError::ReadFailed(e.to_string()))?;

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let user_name: Option<String> = self
            .session
            .get(USER_NAME_KEY)
            .await
            .map_err(|e| SessionError::ReadFailed(e.to_string()))?;

        Ok(Some(Identity {
            user_id,
            user_name: user_name.unwrap_or_default(),
        }))
    }

    async fn destroy(&self) -> Result<(), SessionError> {
        self.session
            .flush()
            .await
            .map_err(|e| SessionError::DestroyFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::SessionStore;

    use super::*;
    use crate::outbound::sessions::MemorySessionStore;

    fn identity() -> Identity {
        Identity {
            user_id: "alice".to_string(),
            user_name: "Alice A".to_string(),
        }
    }

    #[tokio::test]
    async fn test_establish_persists_identity() {
        let store = MemorySessionStore::new();
        let session = CookieSession::new(Session::new(None, Arc::new(store.clone()), None));

        session.establish(&identity()).await.unwrap();

        assert_eq!(store.session_count().await, 1);
        assert_eq!(session.identity().await.unwrap(), Some(identity()));
    }

    #[tokio::test]
    async fn test_fresh_session_has_no_identity() {
        let store = MemorySessionStore::new();
        let session = CookieSession::new(Session::new(None, Arc::new(store), None));

        assert_eq!(session.identity().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_establish_cycles_session_id() {
        let store = MemorySessionStore::new();
        let session = Session::new(None, Arc::new(store.clone()), None);
        session.insert("visited", true).await.unwrap();
        session.save().await.unwrap();
        let anonymous_id = session.id().unwrap();

        let cookie_session = CookieSession::new(session.clone());
        cookie_session.establish(&identity()).await.unwrap();

        assert_ne!(session.id(), Some(anonymous_id));
        assert!(store.load(&anonymous_id).await.unwrap().is_none());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_destroy_removes_record_and_is_repeatable() {
        let store = MemorySessionStore::new();
        let session = CookieSession::new(Session::new(None, Arc::new(store.clone()), None));
        session.establish(&identity()).await.unwrap();

        session.destroy().await.unwrap();
        session.destroy().await.unwrap();

        assert_eq!(store.session_count().await, 0);
        assert_eq!(session.identity().await.unwrap(), None);
    }
}

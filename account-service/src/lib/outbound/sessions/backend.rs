use async_trait::async_trait;
use sqlx::PgPool;
use tower_sessions::session::Id;
use tower_sessions::session::Record;
use tower_sessions::session_store;
use tower_sessions::ExpiredDeletion;
use tower_sessions::SessionStore;
use tower_sessions_sqlx_store::PostgresStore;

use super::memory::MemorySessionStore;
use crate::config::SessionStoreKind;

/// Session store selected at startup.
///
/// Handlers and the session layer only see the `SessionStore` impl, never
/// the variant.
#[derive(Debug, Clone)]
pub enum SessionBackend {
    Postgres(PostgresStore),
    Memory(MemorySessionStore),
}

impl SessionBackend {
    pub fn memory() -> Self {
        SessionBackend::Memory(MemorySessionStore::new())
    }

    /// Pick the store for `kind`.
    ///
    /// The persistent store creates its table on selection. If that fails
    /// the process keeps running on in-memory sessions.
    pub async fn select(kind: SessionStoreKind, pool: &PgPool) -> Self {
        match kind {
            SessionStoreKind::Memory => {
                tracing::info!(store = "memory", "Session store selected");
                Self::memory()
            }
            SessionStoreKind::Postgres => {
                let store = PostgresStore::new(pool.clone());
                match store.migrate().await {
                    Ok(()) => {
                        tracing::info!(store = "postgresql", "Session store selected");
                        SessionBackend::Postgres(store)
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            store = "memory",
                            "Persistent session store unavailable, sessions will not survive a restart"
                        );
                        Self::memory()
                    }
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionBackend::Postgres(_) => "postgresql",
            SessionBackend::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            SessionBackend::Postgres(store) => store.create(record).await,
            SessionBackend::Memory(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            SessionBackend::Postgres(store) => store.save(record).await,
            SessionBackend::Memory(store) => store.save(record).await,
        }
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            SessionBackend::Postgres(store) => store.load(session_id).await,
            SessionBackend::Memory(store) => store.load(session_id).await,
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        match self {
            SessionBackend::Postgres(store) => store.delete(session_id).await,
            SessionBackend::Memory(store) => store.delete(session_id).await,
        }
    }
}

#[async_trait]
impl ExpiredDeletion for SessionBackend {
    async fn delete_expired(&self) -> session_store::Result<()> {
        match self {
            SessionBackend::Postgres(store) => store.delete_expired().await,
            SessionBackend::Memory(store) => store.delete_expired().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sqlx::postgres::PgConnectOptions;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    #[tokio::test]
    async fn test_select_memory() {
        let pool = PgPoolOptions::new().connect_lazy_with(PgConnectOptions::new());
        let backend = SessionBackend::select(SessionStoreKind::Memory, &pool).await;

        assert_eq!(backend.name(), "memory");
    }

    #[tokio::test]
    async fn test_select_falls_back_when_database_is_unreachable() {
        let options = PgConnectOptions::new().host("127.0.0.1").port(1);
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy_with(options);

        let backend = SessionBackend::select(SessionStoreKind::Postgres, &pool).await;

        assert_eq!(backend.name(), "memory");
    }
}

use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::postgres::PgSslMode;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Build connection options from the configured parameters.
///
/// # Errors
/// Returns error if `ssl_mode` is not a PostgreSQL sslmode name
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let ssl_mode = PgSslMode::from_str(&config.ssl_mode)?;

    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(ssl_mode);

    if let Some(root_cert) = &config.ssl_root_cert {
        options = options.ssl_root_cert(root_cert);
    }

    Ok(options)
}

/// Create the connection pool without connecting.
///
/// Connections are opened on first use, so the service starts even when
/// the database is down; callers then fail after the acquire timeout.
pub fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy_with(options))
}

/// Apply the embedded schema migrations for the credential store.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "db.internal".to_string(),
            port: 6543,
            username: "accounts".to_string(),
            password: "hunter22".to_string(),
            name: "accounts".to_string(),
            ssl_mode: "require".to_string(),
            ssl_root_cert: None,
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }

    #[test]
    fn test_connect_options() {
        let options = connect_options(&database_config()).unwrap();

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "accounts");
        assert_eq!(options.get_database(), Some("accounts"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn test_invalid_ssl_mode() {
        let mut config = database_config();
        config.ssl_mode = "sometimes".to_string();

        assert!(connect_options(&config).is_err());
    }

    #[tokio::test]
    async fn test_create_pool_does_not_connect() {
        let mut config = database_config();
        config.host = "127.0.0.1".to_string();
        config.port = 1;

        let pool = create_pool(&config).unwrap();
        assert_eq!(pool.size(), 0);
    }
}

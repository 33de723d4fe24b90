use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;

/// Application configuration for account-service.
///
/// Resolved once at startup and passed down explicitly.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub password: PasswordConfig,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
    /// Where page requests without a session are redirected.
    pub login_path: String,
}

/// PostgreSQL connection parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    /// CA bundle to trust instead of the system roots.
    #[serde(default)]
    pub ssl_root_cert: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Which session store backs the cookie sessions.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    Postgres,
    Memory,
}

/// Session cookie and store configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub store: SessionStoreKind,
    pub cookie_name: String,
    pub max_age_hours: i64,
    pub sweep_interval_secs: u64,
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub fn max_age(&self) -> time::Duration {
        time::Duration::hours(self.max_age_hours)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl PasswordConfig {
    pub fn hasher(&self) -> Result<auth::PasswordHasher, auth::PasswordError> {
        auth::PasswordHasher::with_params(self.memory_kib, self.iterations, self.parallelism)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__HOST, SESSION__STORE, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    ///
    /// # Errors
    /// Returns error if configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let environment: Map<String, String> = env::vars().collect();

        Self::resolve("config", &run_mode, environment)
    }

    /// Resolve configuration from explicit inputs.
    ///
    /// Reads nothing from the process environment; `environment` stands in
    /// for it.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `default.toml` and `{run_mode}.toml`
    /// * `run_mode` - Name of the environment-specific file
    /// * `environment` - Variables to layer on top, `__` separating path segments
    ///
    /// # Errors
    /// Returns error if configuration values are missing or invalid
    pub fn resolve(
        config_dir: &str,
        run_mode: &str,
        environment: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.http_port", 3000)?
            .set_default("server.login_path", "/login.html")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.username", "postgres")?
            .set_default("database.password", "postgres")?
            .set_default("database.name", "accounts")?
            .set_default("database.ssl_mode", "prefer")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("session.store", "postgres")?
            .set_default("session.cookie_name", "sid")?
            .set_default("session.max_age_hours", 24)?
            .set_default("session.sweep_interval_secs", 900)?
            .set_default("session.secure_cookie", false)?
            .set_default("password.memory_kib", 19 * 1024)?
            .set_default("password.iterations", 2)?
            .set_default("password.parallelism", 1)?
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Example: DATABASE__HOST=db.internal overrides database.host
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(environment)),
            )
            .build()?;

        configuration.try_deserialize()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::sessions::SessionBackend;
use account_service::user::errors::AuthError;
use async_trait::async_trait;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tokio::sync::Mutex;

/// Credential store double so the HTTP tests need no database
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().await.get(id.as_str()).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().await;
        if users.contains_key(user.id.as_str()) {
            return Err(AuthError::UserIdTaken(user.id.as_str().to_string()));
        }
        users.insert(user.id.as_str().to_string(), user.clone());
        Ok(user)
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub page_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let config = Config::resolve("does-not-exist", "test", Default::default())
            .expect("Failed to resolve configuration");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let password_hasher =
            auth::PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher");
        let user_repo = Arc::new(InMemoryUserRepository::default());
        let auth_service = Arc::new(AuthService::new(user_repo, password_hasher));

        let router = create_router(
            auth_service,
            SessionBackend::memory(),
            &config.session,
            &config.server.login_path,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            page_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make a browser-style GET that does not follow redirects
    pub fn get_page(&self, path: &str) -> reqwest::RequestBuilder {
        self.page_client
            .get(format!("{}{}", self.address, path))
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
    }

    /// Register `user_id` with a valid default profile
    pub async fn register(&self, user_id: &str, password: &str) -> reqwest::Response {
        self.post("/api/register")
            .json(&json!({
                "userId": user_id,
                "name": "Alice Example",
                "email": "alice@example.com",
                "phone": "555-0100",
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, user_id: &str, password: &str) -> reqwest::Response {
        self.post("/api/login")
            .json(&json!({ "userId": user_id, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn logout(&self) -> reqwest::Response {
        self.post("/api/logout")
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Body of `GET /api/session`
    pub async fn session(&self) -> Value {
        self.get("/api/session")
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }
}

/// Test database helper
///
/// Each instance owns a freshly migrated database on the server named by
/// `DATABASE_URL`.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name, or `None` when
    /// `DATABASE_URL` is not set
    pub async fn new() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        };

        let db_name = format!(
            "test_account_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        account_service::outbound::database::migrate(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

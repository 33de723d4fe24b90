use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    user_id: String,
    name: String,
    email: String,
    phone: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.user_id)
            .map_err(|e| AuthError::DatabaseError(format!("Stored user_id is invalid: {}", e)))?;
        let email = EmailAddress::new(row.email)
            .map_err(|e| AuthError::DatabaseError(format!("Stored email is invalid: {}", e)))?;

        Ok(User {
            id,
            name: row.name,
            email,
            phone: row.phone,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, name, email, phone, password_hash, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, name, email, phone, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.phone.as_deref())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // users_pkey is the only unique constraint on the table
                if db_err.is_unique_violation() {
                    return AuthError::UserIdTaken(user.id.as_str().to_string());
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }
}

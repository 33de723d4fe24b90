use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    // A session can only hold an id that passed validation at registration
    let user_id = UserId::new(current_user.user_id)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    state
        .auth_service
        .get_profile(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseData {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for ProfileResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.as_str().to_string(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            phone: user.phone.clone(),
            created_at: user.created_at,
        }
    }
}

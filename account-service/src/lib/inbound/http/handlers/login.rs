use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use tower_sessions::Session;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::outbound::sessions::CookieSession;

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = LoginCommand::new(&body.user_id, &body.password)?;

    state
        .auth_service
        .login(command, &CookieSession::new(session))
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    user_id: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub user_id: String,
    pub name: String,
    pub logged_in: bool,
}

impl From<&User> for LoginResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.as_str().to_string(),
            name: user.name.clone(),
            logged_in: true,
        }
    }
}

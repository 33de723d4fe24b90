use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tower_sessions::Session;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::outbound::sessions::CookieSession;

pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    state
        .auth_service
        .logout(&CookieSession::new(session))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, LogoutResponseData { logged_out: true }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponseData {
    pub logged_out: bool,
}

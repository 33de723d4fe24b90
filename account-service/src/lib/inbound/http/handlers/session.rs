use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tower_sessions::Session;

use super::ApiSuccess;
use crate::domain::user::models::Identity;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::outbound::sessions::CookieSession;

pub async fn get_session(
    State(state): State<AppState>,
    session: Session,
) -> ApiSuccess<SessionResponseData> {
    let identity = state
        .auth_service
        .who_am_i(&CookieSession::new(session))
        .await;

    ApiSuccess::new(StatusCode::OK, identity.into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseData {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl From<Option<Identity>> for SessionResponseData {
    fn from(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self {
                logged_in: true,
                user_id: Some(identity.user_id),
                user_name: Some(identity.user_name),
            },
            None => Self {
                logged_in: false,
                user_id: None,
                user_name: None,
            },
        }
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use tower_sessions::Session;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::outbound::sessions::CookieSession;
use crate::user::errors::ValidationError;

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command, &CookieSession::new(session))
        .await
        .map_err(ApiError::from)
        .map(|ref registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

/// HTTP request body for registering an account (raw JSON).
///
/// Absent fields deserialize as empty so they fail validation with a 400
/// instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    user_id: String,
    name: String,
    email: String,
    phone: Option<String>,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ValidationError> {
        RegisterCommand::new(
            &self.user_id,
            &self.name,
            &self.email,
            self.phone.as_deref(),
            &self.password,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub user_id: String,
    pub name: String,
    pub logged_in: bool,
}

impl From<&Registration> for RegisterResponseData {
    fn from(registration: &Registration) -> Self {
        Self {
            user_id: registration.user.id.as_str().to_string(),
            name: registration.user.name.clone(),
            logged_in: registration.logged_in,
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::Expiry;
use tower_sessions::SessionManagerLayer;
use tracing::Span;

use super::handlers::app_page::app_page;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::profile::get_profile;
use super::handlers::register::register;
use super::handlers::session::get_session;
use super::middleware::require_login;
use crate::config::SessionConfig;
use crate::domain::user::ports::AuthServicePort;
use crate::outbound::sessions::SessionBackend;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub login_path: Arc<str>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    session_store: SessionBackend,
    session_config: &SessionConfig,
    login_path: &str,
) -> Router {
    let state = AppState {
        auth_service,
        login_path: Arc::from(login_path),
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/session", get(get_session));

    let protected_routes = Router::new()
        .route("/app", get(app_page))
        .route("/api/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(session_config.cookie_name.clone())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(session_config.secure_cookie)
        .with_path("/")
        // Sliding window; it acts as a fixed lifetime only while login is the
        // sole write to the session
        .with_expiry(Expiry::OnInactivity(session_config.max_age()));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(session_layer)
        .layer(trace_layer)
        .with_state(state)
}

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Json;
use tower_sessions::Session;

use super::handlers::ApiResponseBody;
use crate::domain::user::models::Identity;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::outbound::sessions::CookieSession;

/// Extension type to store the session's user in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub user_name: String,
}

impl From<Identity> for AuthenticatedUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            user_name: identity.user_name,
        }
    }
}

/// Middleware that admits only requests whose session carries a user.
///
/// Browser page loads are redirected to the login page; everything else
/// gets a 401 JSON body.
pub async fn require_login(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = state
        .auth_service
        .who_am_i(&CookieSession::new(session))
        .await;

    let Some(identity) = identity else {
        tracing::debug!(
            method = %req.method(),
            uri = %req.uri(),
            "Request rejected: not authenticated"
        );
        return Err(reject(&req, &state.login_path));
    };

    req.extensions_mut()
        .insert(AuthenticatedUser::from(identity));

    Ok(next.run(req).await)
}

fn reject(req: &Request, login_path: &str) -> Response {
    if wants_page(req) {
        return Redirect::to(login_path).into_response();
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponseBody::new_error(
            StatusCode::UNAUTHORIZED,
            "Not authenticated".to_string(),
        )),
    )
        .into_response()
}

/// A browser navigation: a GET outside `/api/` that accepts HTML.
fn wants_page(req: &Request) -> bool {
    if req.method() != Method::GET || req.uri().path().starts_with("/api/") {
        return false;
    }

    req.headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request(method: Method, path: &str, accept: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().method(method).uri(path);
        if let Some(accept) = accept {
            builder = builder.header(header::ACCEPT, accept);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_browser_navigation_wants_page() {
        let req = request(
            Method::GET,
            "/app",
            Some("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        assert!(wants_page(&req));
    }

    #[test]
    fn test_api_path_never_wants_page() {
        let req = request(Method::GET, "/api/profile", Some("text/html"));
        assert!(!wants_page(&req));
    }

    #[test]
    fn test_non_get_never_wants_page() {
        let req = request(Method::POST, "/app", Some("text/html"));
        assert!(!wants_page(&req));
    }

    #[test]
    fn test_missing_accept_is_not_a_page() {
        assert!(!wants_page(&request(Method::GET, "/app", None)));
        assert!(!wants_page(&request(
            Method::GET,
            "/app",
            Some("application/json")
        )));
    }

    #[test]
    fn test_reject_page_redirects_to_login() {
        let req = request(Method::GET, "/app", Some("text/html"));
        let response = reject(&req, "/login.html");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login.html"
        );
    }

    #[test]
    fn test_reject_api_is_unauthorized() {
        let req = request(Method::GET, "/api/profile", None);
        let response = reject(&req, "/login.html");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

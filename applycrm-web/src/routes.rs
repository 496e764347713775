//! Route definitions for the ApplyCRM web server

use crate::{auth, handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Authentication
        .route("/auth/login", post(auth::handlers::login_user))
        .route("/auth/logout", post(auth::handlers::logout_user))
        .route("/auth/me", get(auth::handlers::get_current_user))
        .route("/auth/session", get(auth::handlers::get_session))
        .route("/auth/register", post(auth::handlers::register_user))
        // Sidebar for the current session
        .route("/nav", get(handlers::get_nav))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WebConfig;
    use axum::http::{header::LOCATION, StatusCode};
    use tower::ServiceExt;

    fn request(uri: &str) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check_route() {
        let state = AppState::new(WebConfig::default()).unwrap();
        let app = api_routes().with_state(state);

        let response = app.oneshot(request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_nav_requires_session() {
        let state = AppState::new(WebConfig::default()).unwrap();
        let app = api_routes().with_state(state);

        let response = app.oneshot(request("/nav")).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }
}

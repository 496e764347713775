//! Session-backed authentication for the HTTP layer

pub mod handlers;


use crate::sessions::SESSION_COOKIE;
use crate::AppState;
use applycrm_access::{AccessError, AuthError, Identity, RegistrationError, LOGIN_PATH};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error};

/// Authentication redirect for failed auth
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary(LOGIN_PATH).into_response()
    }
}

/// Identity held by the session; anonymous requests are redirected to login
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalIdentity(identity) = OptionalIdentity::from_request_parts(parts, state)
            .await
            .unwrap_or(OptionalIdentity(None));

        identity.map(CurrentIdentity).ok_or_else(|| {
            debug!("No session for {}", parts.uri.path());
            AuthRedirect
        })
    }
}

/// Optional identity extractor - doesn't fail if nobody is logged in
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for OptionalIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let id = jar.get(SESSION_COOKIE).map(|c| c.value());
        Ok(OptionalIdentity(app_state.sessions.identity(id).await))
    }
}

/// Errors surfaced by the API endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            // Both rejection reasons look the same to the visitor
            ApiError::Auth(e) => (StatusCode::UNAUTHORIZED, e.code(), e.user_message().to_string()),
            ApiError::Registration(e) => {
                (StatusCode::BAD_REQUEST, "invalid_registration", e.to_string())
            }
            ApiError::Access(e) => {
                error!("View dispatch failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Unable to render this page".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": error_code,
                "message": message,
            })),
        )
            .into_response()
    }
}

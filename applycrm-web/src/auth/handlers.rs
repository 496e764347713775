//! Authentication handlers for login, logout, session inspection and sign-up

use super::{ApiError, CurrentIdentity, OptionalIdentity};
use crate::sessions::{expired_session_cookie, session_cookie, SESSION_COOKIE};
use crate::AppState;
use applycrm_access::{
    register, Identity, LoginOutcome, LoginRequest, RegistrationReceipt, RegistrationRequest,
    SessionState,
};
use axum::{extract::State, response::Json, Json as JsonExtractor};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Login endpoint
///
/// Resolves the submitted credentials against the directory and, on success,
/// opens a session for this client and sets its cookie. The response carries
/// the landing path for the identity's role.
pub async fn login_user(
    State(app_state): State<AppState>,
    jar: CookieJar,
    JsonExtractor(request): JsonExtractor<LoginRequest>,
) -> Result<(CookieJar, Json<LoginOutcome>), ApiError> {
    info!("Login attempt: {} via {} portal", request.email, request.portal);

    let previous = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (id, outcome) = app_state
        .sessions
        .login(previous.as_deref(), &app_state.resolver, &request)
        .await
        .inspect_err(|e| {
            warn!("Login rejected for {}: {}", request.email, e);
        })?;

    Ok((jar.add(session_cookie(id)), Json(outcome)))
}

/// Logout endpoint; clears only the caller's session and is safe to call without one
pub async fn logout_user(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let id = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let redirect = app_state.sessions.logout(id.as_deref()).await;

    (
        jar.remove(expired_session_cookie()),
        Json(json!({
            "message": "Logged out successfully",
            "redirect": redirect,
        })),
    )
}

/// Get the identity held by the session
pub async fn get_current_user(CurrentIdentity(identity): CurrentIdentity) -> Json<Identity> {
    Json(identity)
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

/// Session state machine position, available to anonymous callers too
pub async fn get_session(OptionalIdentity(identity): OptionalIdentity) -> Json<SessionResponse> {
    Json(SessionResponse {
        state: SessionState::of(identity.as_ref()),
        user: identity,
    })
}

/// Sign-up endpoint
///
/// Validates the submission and returns the confirmation. Nothing is stored,
/// so the new account cannot log in.
pub async fn register_user(
    JsonExtractor(request): JsonExtractor<RegistrationRequest>,
) -> Result<Json<RegistrationReceipt>, ApiError> {
    info!(
        "Registration attempt: {} as {}",
        request.email,
        request.account_type.role()
    );

    Ok(Json(register(&request)?))
}

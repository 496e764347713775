//! Page navigation through the access router

use crate::auth::{ApiError, AuthRedirect, CurrentIdentity, OptionalIdentity};
use crate::handlers::pages::PageDescriptor;
use crate::AppState;
use applycrm_access::{nav_items, AccessDecision, NavItem, PortalView};
use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

/// Evaluate a navigation and render its descriptor, or redirect to login
///
/// Serves as the router fallback, so every path outside `/api` lands here.
pub async fn navigate(
    State(app_state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
    uri: Uri,
) -> Result<Response, ApiError> {
    let path = uri.path();

    match app_state.router.decide(identity.as_ref(), path) {
        AccessDecision::Public(page) => {
            Ok(Json(PageDescriptor::for_page(page, &app_state)).into_response())
        }
        AccessDecision::Render(target) => match identity {
            Some(identity) => Ok(Json(PortalView::build(&target, &identity)?).into_response()),
            None => Ok(AuthRedirect.into_response()),
        },
        AccessDecision::Redirect(_) => {
            warn!(
                "Navigation to {} denied for {}",
                path,
                identity
                    .as_ref()
                    .map(|i| i.role.to_string())
                    .unwrap_or_else(|| "anonymous".to_string())
            );
            Ok(AuthRedirect.into_response())
        }
    }
}

/// Navigation items for the session's role
pub async fn get_nav(CurrentIdentity(identity): CurrentIdentity) -> Json<Vec<&'static NavItem>> {
    Json(nav_items(identity.role))
}

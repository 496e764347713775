//! Session holder
//!
//! A session holds zero or one identity. It is an ordinary value passed to
//! whoever needs it; login replaces the identity wholesale and logout clears
//! it.

use crate::credentials::{CredentialResolver, LoginRequest};
use crate::error::AuthError;
use crate::policy::{PortalArea, LOGIN_PATH};
use applycrm_core::{Identity, Role};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<Identity>,
}

impl Session {
    /// An empty (anonymous) session
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever identity is held
    pub fn set(&mut self, identity: Identity) {
        self.current = Some(identity);
    }

    /// Drop the held identity; clearing an empty session is a no-op
    pub fn clear(&mut self) -> Option<Identity> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn state(&self) -> SessionState {
        SessionState::of(self.current())
    }
}

/// Lifecycle state derived from the held identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "role", rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    Student,
    AgentUnapproved,
    AgentApproved,
    Internal(Role),
}

impl SessionState {
    pub fn of(identity: Option<&Identity>) -> Self {
        match identity {
            None => SessionState::Anonymous,
            Some(identity) => match identity.role {
                Role::Student => SessionState::Student,
                Role::Agent if identity.is_approved_agent() => SessionState::AgentApproved,
                Role::Agent => SessionState::AgentUnapproved,
                role => SessionState::Internal(role),
            },
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    #[serde(rename = "user")]
    pub identity: Identity,
    pub redirect: &'static str,
}

/// Resolve a submission and, on success, store the identity in the session
///
/// A rejected submission leaves the session exactly as it was.
pub fn login(
    session: &mut Session,
    resolver: &CredentialResolver,
    request: &LoginRequest,
) -> Result<LoginOutcome, AuthError> {
    let identity = resolver.resolve(request).inspect_err(|e| {
        debug!("Login rejected for {}: {}", request.email, e);
    })?;

    let redirect = PortalArea::for_role(identity.role).landing_path();
    info!(
        "User {} logged in as {} via {} portal",
        identity.email, identity.role, request.portal
    );

    session.set(identity.clone());
    Ok(LoginOutcome { identity, redirect })
}

/// Clear the session and return where to send the visitor
pub fn logout(session: &mut Session) -> &'static str {
    if let Some(identity) = session.clear() {
        info!("User {} logged out", identity.email);
    }
    LOGIN_PATH
}

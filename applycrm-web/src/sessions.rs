//! Per-client session table
//!
//! Each browser gets an opaque id in the `applycrm_session` cookie. The id
//! keys one `Session` in the table; requests without a known id are
//! anonymous.

use applycrm_access::{
    login, logout, AuthError, CredentialResolver, Identity, LoginOutcome, LoginRequest, Session,
    LOGIN_PATH,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "applycrm_session";

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity held under `id`, if the id is known
    pub async fn identity(&self, id: Option<&str>) -> Option<Identity> {
        let id = id?;
        let sessions = self.sessions.read().await;
        sessions.get(id).and_then(|s| s.current().cloned())
    }

    /// Log in and file the session under a freshly issued id
    ///
    /// On success any session previously held under `previous` is dropped.
    /// A rejected submission leaves the table untouched.
    pub async fn login(
        &self,
        previous: Option<&str>,
        resolver: &CredentialResolver,
        request: &LoginRequest,
    ) -> Result<(String, LoginOutcome), AuthError> {
        let mut session = Session::new();
        let outcome = login(&mut session, resolver, request)?;

        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        if let Some(previous) = previous {
            sessions.remove(previous);
        }
        sessions.insert(id.clone(), session);
        debug!("Issued session {} ({} active)", id, sessions.len());

        Ok((id, outcome))
    }

    /// Clear only the session under `id`; unknown or missing ids are a no-op
    pub async fn logout(&self, id: Option<&str>) -> &'static str {
        let Some(id) = id else {
            return LOGIN_PATH;
        };
        match self.sessions.write().await.remove(id) {
            Some(mut session) => logout(&mut session),
            None => LOGIN_PATH,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Cookie handed to the browser after a successful login
pub fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that expires the session id on the client
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

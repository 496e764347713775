//! Credential resolution
//!
//! Maps a submitted (email, password, portal) triple to an [`Identity`] or a
//! rejection. The lookup itself sits behind [`AuthenticationService`] so the
//! static directory can be swapped for a real authentication backend.

use crate::error::AuthError;
use applycrm_core::{CrmResult, DirectoryConfig, Identity, PortalType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Authentication backend seam
pub trait AuthenticationService: Send + Sync {
    /// Check an email/password pair and return the matching identity
    fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError>;
}

/// Login form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub portal: PortalType,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str, portal: PortalType) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            portal,
        }
    }
}

/// Static credential table: email -> identity, one shared password
#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    accounts: HashMap<String, Identity>,
    shared_password: String,
}

impl CredentialDirectory {
    /// Build a directory from configuration, rejecting ambiguous tables
    pub fn from_config(config: &DirectoryConfig) -> CrmResult<Self> {
        config.validate()?;
        Ok(Self::from_accounts(
            config.accounts.iter().cloned(),
            &config.shared_password,
        ))
    }

    /// The demo accounts with password `demo123`
    pub fn demo() -> Self {
        let config = DirectoryConfig::default();
        Self::from_accounts(config.accounts, &config.shared_password)
    }

    fn from_accounts(accounts: impl IntoIterator<Item = Identity>, shared_password: &str) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|identity| (identity.email.clone(), identity))
                .collect(),
            shared_password: shared_password.to_string(),
        }
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, email: &str) -> Option<&Identity> {
        self.accounts.get(email)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AuthenticationService for CredentialDirectory {
    fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self.lookup(email).ok_or_else(|| {
            debug!("Unknown email: {}", email);
            AuthError::InvalidCredentials
        })?;

        if password != self.shared_password {
            debug!("Wrong password for: {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(identity.clone())
    }
}

/// Resolves login submissions: credentials first, then the portal type
#[derive(Clone)]
pub struct CredentialResolver {
    service: Arc<dyn AuthenticationService>,
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver").finish_non_exhaustive()
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(Arc::new(CredentialDirectory::demo()))
    }
}

impl CredentialResolver {
    pub fn new(service: Arc<dyn AuthenticationService>) -> Self {
        Self { service }
    }

    /// Resolve a submission to an identity
    ///
    /// Pure lookup; storing the identity is the caller's job.
    pub fn resolve(&self, request: &LoginRequest) -> Result<Identity, AuthError> {
        let identity = self
            .service
            .authenticate(&request.email, &request.password)?;

        if !request.portal.admits(identity.role) {
            debug!(
                "Portal mismatch for {}: role {} via {} portal",
                request.email, identity.role, request.portal
            );
            return Err(AuthError::PortalMismatch {
                role: identity.role,
                portal: request.portal,
            });
        }

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applycrm_core::{demo_accounts, Role};

    const EMAILS: [&str; 7] = [
        "student@demo.com",
        "agent@demo.com",
        "marketing@demo.com",
        "application@demo.com",
        "compliance@demo.com",
        "case@demo.com",
        "admin@demo.com",
    ];

    #[test]
    fn test_every_known_email_resolves_on_its_portal() {
        let resolver = CredentialResolver::default();
        for email in EMAILS {
            let directory = CredentialDirectory::demo();
            let role = directory.lookup(email).unwrap().role;
            let request = LoginRequest::new(email, "demo123", PortalType::for_role(role));

            let identity = resolver.resolve(&request).unwrap();
            assert_eq!(identity.email, email);
        }
    }

    #[test]
    fn test_wrong_password_rejected_on_every_portal() {
        let resolver = CredentialResolver::default();
        for email in EMAILS {
            for portal in [PortalType::Public, PortalType::Internal] {
                let request = LoginRequest::new(email, "wrongpassword", portal);
                assert_eq!(
                    resolver.resolve(&request),
                    Err(AuthError::InvalidCredentials)
                );
            }
        }
    }

    #[test]
    fn test_unknown_email_rejected() {
        let resolver = CredentialResolver::default();
        let request = LoginRequest::new("nobody@demo.com", "demo123", PortalType::Public);
        assert_eq!(resolver.resolve(&request), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_email_lookup_is_case_sensitive() {
        let resolver = CredentialResolver::default();
        let request = LoginRequest::new("Student@demo.com", "demo123", PortalType::Public);
        assert_eq!(resolver.resolve(&request), Err(AuthError::InvalidCredentials));

        let padded = LoginRequest::new(" student@demo.com", "demo123", PortalType::Public);
        assert!(resolver.resolve(&padded).is_err());
    }

    #[test]
    fn test_portal_mismatch() {
        let resolver = CredentialResolver::default();

        let student = LoginRequest::new("student@demo.com", "demo123", PortalType::Internal);
        assert_eq!(
            resolver.resolve(&student),
            Err(AuthError::PortalMismatch {
                role: Role::Student,
                portal: PortalType::Internal
            })
        );

        let admin = LoginRequest::new("admin@demo.com", "demo123", PortalType::Public);
        assert!(matches!(
            resolver.resolve(&admin),
            Err(AuthError::PortalMismatch { .. })
        ));
    }

    #[test]
    fn test_wrong_password_wins_over_portal_mismatch() {
        let resolver = CredentialResolver::default();
        let request = LoginRequest::new("admin@demo.com", "nope", PortalType::Public);
        assert_eq!(resolver.resolve(&request), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_identity_returned_unchanged() {
        let resolver = CredentialResolver::default();
        let request = LoginRequest::new("agent@demo.com", "demo123", PortalType::Public);
        let identity = resolver.resolve(&request).unwrap();

        let expected = demo_accounts()
            .into_iter()
            .find(|a| a.email == "agent@demo.com")
            .unwrap();
        assert_eq!(identity, expected);
    }

    #[test]
    fn test_directory_from_config() {
        let mut config = DirectoryConfig::default();
        config.shared_password = "s3cret".to_string();
        let directory = CredentialDirectory::from_config(&config).unwrap();
        assert_eq!(directory.len(), 7);

        assert!(directory.authenticate("case@demo.com", "s3cret").is_ok());
        assert!(directory.authenticate("case@demo.com", "demo123").is_err());
    }

    #[test]
    fn test_directory_rejects_duplicate_emails() {
        let mut config = DirectoryConfig::default();
        let mut dup = config.accounts[1].clone();
        dup.id = "42".to_string();
        config.accounts.push(dup);

        assert!(CredentialDirectory::from_config(&config).is_err());
    }

    #[test]
    fn test_login_request_defaults_to_public_portal() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"student@demo.com","password":"demo123"}"#).unwrap();
        assert_eq!(request.portal, PortalType::Public);
    }

    struct RejectAll;

    impl AuthenticationService for RejectAll {
        fn authenticate(&self, _email: &str, _password: &str) -> Result<Identity, AuthError> {
            Err(AuthError::InvalidCredentials)
        }
    }

    #[test]
    fn test_resolver_uses_injected_service() {
        let resolver = CredentialResolver::new(Arc::new(RejectAll));
        let request = LoginRequest::new("student@demo.com", "demo123", PortalType::Public);
        assert!(resolver.resolve(&request).is_err());
    }
}

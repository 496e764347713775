//! Access-layer error types

use applycrm_core::{PortalType, Role};

/// Login rejection
///
/// The variants stay distinct for logging; callers facing a user must show
/// [`AuthError::user_message`] for both.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Role '{role}' cannot sign in through the {portal} portal")]
    PortalMismatch { role: Role, portal: PortalType },
}

impl AuthError {
    /// The one message shown on the login form
    pub const USER_MESSAGE: &'static str = "Invalid credentials or portal type";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        "invalid_credentials"
    }
}

/// Errors from view dispatch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Role '{0}' has no internal dashboard")]
    NotInternal(Role),
}

/// Sign-up validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),
    #[error("Unsupported country: {0}")]
    UnknownCountry(String),
    #[error("Agency name is required for agent accounts")]
    MissingAgencyName,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

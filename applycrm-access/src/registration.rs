//! Public-portal sign-up
//!
//! Submissions are validated and acknowledged, never stored: a registered
//! account cannot log in until it exists in the credential directory.

use crate::error::RegistrationError;
use crate::policy::LOGIN_PATH;
use applycrm_core::Role;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Countries offered on the sign-up form
pub const COUNTRIES: [&str; 6] = ["india", "pakistan", "bangladesh", "nepal", "sri-lanka", "other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Student,
    Agent,
}

impl AccountType {
    pub fn role(&self) -> Role {
        match self {
            AccountType::Student => Role::Student,
            AccountType::Agent => Role::Agent,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub account_type: AccountType,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    #[serde(default, alias = "agencyName")]
    pub agency_name: Option<String>,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationReceipt {
    pub account_type: AccountType,
    /// Agents wait for an administrator before they can use the portal
    pub pending_approval: bool,
    pub message: &'static str,
    pub redirect: &'static str,
}

/// Validate a sign-up and produce the confirmation shown to the visitor
pub fn register(request: &RegistrationRequest) -> Result<RegistrationReceipt, RegistrationError> {
    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("phone", &request.phone),
        ("country", &request.country),
        ("password", &request.password),
        ("confirm_password", &request.confirm_password),
    ] {
        if value.trim().is_empty() {
            return Err(RegistrationError::MissingField(field));
        }
    }

    if !COUNTRIES.contains(&request.country.as_str()) {
        return Err(RegistrationError::UnknownCountry(request.country.clone()));
    }

    let is_agent = request.account_type == AccountType::Agent;
    if is_agent && request.agency_name.as_deref().unwrap_or_default().trim().is_empty() {
        return Err(RegistrationError::MissingAgencyName);
    }

    if request.password != request.confirm_password {
        return Err(RegistrationError::PasswordMismatch);
    }

    info!(
        "Registration accepted for {} as {}",
        request.email,
        request.account_type.role()
    );

    let message = if is_agent {
        "Registration successful! Your account is pending admin approval. Redirecting to login..."
    } else {
        "Registration successful! Redirecting to login..."
    };

    Ok(RegistrationReceipt {
        account_type: request.account_type,
        pending_approval: is_agent,
        message,
        redirect: LOGIN_PATH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CredentialResolver, LoginRequest};
    use applycrm_core::PortalType;

    fn student_request() -> RegistrationRequest {
        RegistrationRequest {
            account_type: AccountType::Student,
            name: "Ayesha Siddiqua".to_string(),
            email: "ayesha@example.com".to_string(),
            phone: "+8801700000000".to_string(),
            country: "bangladesh".to_string(),
            agency_name: None,
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_student_registration() {
        let receipt = register(&student_request()).unwrap();
        assert!(!receipt.pending_approval);
        assert_eq!(receipt.redirect, "/login");
        assert_eq!(receipt.message, "Registration successful! Redirecting to login...");
    }

    #[test]
    fn test_agent_registration_pending_approval() {
        let request = RegistrationRequest {
            account_type: AccountType::Agent,
            agency_name: Some("Global Study Partners".to_string()),
            ..student_request()
        };
        let receipt = register(&request).unwrap();
        assert!(receipt.pending_approval);
        assert!(receipt.message.contains("pending admin approval"));
    }

    #[test]
    fn test_agent_requires_agency_name() {
        let mut request = RegistrationRequest {
            account_type: AccountType::Agent,
            ..student_request()
        };
        assert_eq!(register(&request), Err(RegistrationError::MissingAgencyName));

        request.agency_name = Some("   ".to_string());
        assert_eq!(register(&request), Err(RegistrationError::MissingAgencyName));
    }

    #[test]
    fn test_missing_fields() {
        let request = RegistrationRequest {
            phone: String::new(),
            ..student_request()
        };
        assert_eq!(register(&request), Err(RegistrationError::MissingField("phone")));

        let request = RegistrationRequest {
            name: "  ".to_string(),
            ..student_request()
        };
        assert_eq!(register(&request), Err(RegistrationError::MissingField("name")));
    }

    #[test]
    fn test_unknown_country() {
        let request = RegistrationRequest {
            country: "Bangladesh".to_string(),
            ..student_request()
        };
        assert_eq!(
            register(&request),
            Err(RegistrationError::UnknownCountry("Bangladesh".to_string()))
        );
        for country in COUNTRIES {
            let request = RegistrationRequest {
                country: country.to_string(),
                ..student_request()
            };
            assert!(register(&request).is_ok(), "{}", country);
        }
    }

    #[test]
    fn test_password_mismatch() {
        let request = RegistrationRequest {
            confirm_password: "hunter23".to_string(),
            ..student_request()
        };
        assert_eq!(register(&request), Err(RegistrationError::PasswordMismatch));
    }

    #[test]
    fn test_registered_account_cannot_log_in() {
        let request = student_request();
        register(&request).unwrap();

        let login = LoginRequest::new(&request.email, &request.password, PortalType::Public);
        assert!(CredentialResolver::default().resolve(&login).is_err());
    }

    #[test]
    fn test_camel_case_form_fields_accepted() {
        let request: RegistrationRequest = serde_json::from_str(
            r#"{
                "account_type": "agent",
                "name": "Imran",
                "email": "imran@example.com",
                "phone": "123",
                "country": "nepal",
                "agencyName": "Himalaya Education",
                "password": "pw",
                "confirmPassword": "pw"
            }"#,
        )
        .unwrap();
        assert_eq!(request.account_type.role(), Role::Agent);
        assert!(register(&request).unwrap().pending_approval);
    }
}

//! Core data type definitions

use serde::{Deserialize, Serialize};

/// Permission class of an account. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Applicant using the public portal
    Student,
    /// Recruitment agent using the public portal (requires approval)
    Agent,
    /// Marketing officer
    Marketing,
    /// Application officer
    Application,
    /// Compliance officer
    Compliance,
    /// Case officer
    Case,
    /// Super administrator
    SuperAdmin,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 7] = [
        Role::Student,
        Role::Agent,
        Role::Marketing,
        Role::Application,
        Role::Compliance,
        Role::Case,
        Role::SuperAdmin,
    ];

    /// Staff roles served by the internal portal
    pub const INTERNAL: [Role; 5] = [
        Role::Marketing,
        Role::Application,
        Role::Compliance,
        Role::Case,
        Role::SuperAdmin,
    ];

    /// Whether this role belongs to the internal (staff) portal
    pub fn is_internal(&self) -> bool {
        Self::INTERNAL.contains(self)
    }

    /// Label shown in portal headers
    pub fn display_label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Agent => "Agent",
            Role::Marketing => "Marketing",
            Role::Application => "Application",
            Role::Compliance => "Compliance",
            Role::Case => "Case",
            Role::SuperAdmin => "Super Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Agent => write!(f, "agent"),
            Role::Marketing => write!(f, "marketing"),
            Role::Application => write!(f, "application"),
            Role::Compliance => write!(f, "compliance"),
            Role::Case => write!(f, "case"),
            Role::SuperAdmin => write!(f, "superadmin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "agent" => Ok(Role::Agent),
            "marketing" => Ok(Role::Marketing),
            "application" => Ok(Role::Application),
            "compliance" => Ok(Role::Compliance),
            "case" => Ok(Role::Case),
            "superadmin" => Ok(Role::SuperAdmin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Audience declared on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalType {
    /// Students and agents
    #[default]
    Public,
    /// Staff
    Internal,
}

impl PortalType {
    /// The only portal a role may sign in through
    pub fn for_role(role: Role) -> Self {
        if role.is_internal() {
            PortalType::Internal
        } else {
            PortalType::Public
        }
    }

    /// Check whether this portal admits the given role
    pub fn admits(&self, role: Role) -> bool {
        Self::for_role(role) == *self
    }
}

impl std::fmt::Display for PortalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortalType::Public => write!(f, "public"),
            PortalType::Internal => write!(f, "internal"),
        }
    }
}

impl std::str::FromStr for PortalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(PortalType::Public),
            "internal" => Ok(PortalType::Internal),
            _ => Err(format!("Unknown portal type: {}", s)),
        }
    }
}

/// Authenticated account record held by a session
///
/// Identities are never mutated in place; a new login replaces the whole
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Only meaningful for agents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl Identity {
    pub fn new(id: &str, name: &str, email: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            approved: None,
        }
    }

    /// Set the approval flag
    pub fn with_approval(mut self, approved: bool) -> Self {
        self.approved = Some(approved);
        self
    }

    /// True iff this is an agent whose approval flag is explicitly set
    pub fn is_approved_agent(&self) -> bool {
        self.role == Role::Agent && self.approved == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_round_trip() {
        for role in Role::ALL {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("SuperAdmin".parse::<Role>().is_err());
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_names() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"superadmin\"");
        let role: Role = serde_json::from_str("\"case\"").unwrap();
        assert_eq!(role, Role::Case);
    }

    #[test]
    fn test_internal_roles() {
        assert!(!Role::Student.is_internal());
        assert!(!Role::Agent.is_internal());
        for role in Role::INTERNAL {
            assert!(role.is_internal());
        }
    }

    #[test]
    fn test_portal_admits() {
        assert!(PortalType::Public.admits(Role::Student));
        assert!(PortalType::Public.admits(Role::Agent));
        assert!(!PortalType::Public.admits(Role::SuperAdmin));
        assert!(PortalType::Internal.admits(Role::Compliance));
        assert!(!PortalType::Internal.admits(Role::Student));
    }

    #[test]
    fn test_agent_approval() {
        let agent = Identity::new("2", "Tahmid Ahmed", "agent@demo.com", Role::Agent);
        assert!(!agent.is_approved_agent());
        assert!(!agent.clone().with_approval(false).is_approved_agent());
        assert!(agent.with_approval(true).is_approved_agent());

        // The flag has no effect outside the agent role
        let student =
            Identity::new("1", "Rahim Uddin", "student@demo.com", Role::Student).with_approval(true);
        assert!(!student.is_approved_agent());
    }
}

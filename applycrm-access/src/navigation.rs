//! Navigation tables and portal sections
//!
//! The tables are static and ordered. A role sees exactly the items whose
//! `roles` list contains it; super admin is listed explicitly everywhere it
//! is allowed rather than inheriting access.

use crate::policy::PortalArea;
use applycrm_core::Role;
use serde::{Deserialize, Serialize};

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    /// Icon reference understood by the front end
    pub icon: &'static str,
    pub roles: &'static [Role],
}

const STUDENT_ONLY: &[Role] = &[Role::Student];
const AGENT_ONLY: &[Role] = &[Role::Agent];
const ALL_STAFF: &[Role] = &[
    Role::SuperAdmin,
    Role::Marketing,
    Role::Application,
    Role::Compliance,
    Role::Case,
];
const SUPERADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

pub static STUDENT_NAV: [NavItem; 4] = [
    NavItem {
        path: "/student/dashboard",
        label: "Dashboard",
        icon: "layout-dashboard",
        roles: STUDENT_ONLY,
    },
    NavItem {
        path: "/student/documents",
        label: "Documents",
        icon: "file-up",
        roles: STUDENT_ONLY,
    },
    NavItem {
        path: "/student/progress",
        label: "Progress",
        icon: "clipboard-list",
        roles: STUDENT_ONLY,
    },
    NavItem {
        path: "/student/notifications",
        label: "Notifications",
        icon: "bell",
        roles: STUDENT_ONLY,
    },
];

pub static AGENT_NAV: [NavItem; 3] = [
    NavItem {
        path: "/agent/dashboard",
        label: "Dashboard",
        icon: "layout-dashboard",
        roles: AGENT_ONLY,
    },
    NavItem {
        path: "/agent/students",
        label: "My Students",
        icon: "users",
        roles: AGENT_ONLY,
    },
    NavItem {
        path: "/agent/submissions",
        label: "Submissions",
        icon: "file-up",
        roles: AGENT_ONLY,
    },
];

pub static INTERNAL_NAV: [NavItem; 7] = [
    NavItem {
        path: "/internal/dashboard",
        label: "Dashboard",
        icon: "layout-dashboard",
        roles: ALL_STAFF,
    },
    NavItem {
        path: "/internal/users",
        label: "User Management",
        icon: "users",
        roles: SUPERADMIN_ONLY,
    },
    NavItem {
        path: "/internal/reports",
        label: "Reports & Analytics",
        icon: "bar-chart-3",
        roles: SUPERADMIN_ONLY,
    },
    NavItem {
        path: "/internal/marketing",
        label: "Marketing Management",
        icon: "megaphone",
        roles: &[Role::SuperAdmin, Role::Marketing],
    },
    NavItem {
        path: "/internal/applications",
        label: "Applications",
        icon: "file-check",
        roles: &[Role::SuperAdmin, Role::Application],
    },
    NavItem {
        path: "/internal/compliance",
        label: "Compliance",
        icon: "shield-check",
        roles: &[Role::SuperAdmin, Role::Compliance],
    },
    NavItem {
        path: "/internal/cases",
        label: "Case Management",
        icon: "briefcase",
        roles: &[Role::SuperAdmin, Role::Case],
    },
];

/// Full nav table of a portal area
pub fn nav_table(area: PortalArea) -> &'static [NavItem] {
    match area {
        PortalArea::Student => &STUDENT_NAV,
        PortalArea::Agent => &AGENT_NAV,
        PortalArea::Internal => &INTERNAL_NAV,
    }
}

/// Items shown to a role, in table order
pub fn nav_items(role: Role) -> Vec<&'static NavItem> {
    nav_table(PortalArea::for_role(role))
        .iter()
        .filter(|item| item.roles.contains(&role))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentSection {
    Dashboard,
    Documents,
    Progress,
    Notifications,
}

impl StudentSection {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "dashboard" => Some(Self::Dashboard),
            "documents" => Some(Self::Documents),
            "progress" => Some(Self::Progress),
            "notifications" => Some(Self::Notifications),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/student/dashboard",
            Self::Documents => "/student/documents",
            Self::Progress => "/student/progress",
            Self::Notifications => "/student/notifications",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentSection {
    Dashboard,
    Students,
    Submissions,
}

impl AgentSection {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "dashboard" => Some(Self::Dashboard),
            "students" => Some(Self::Students),
            "submissions" => Some(Self::Submissions),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/agent/dashboard",
            Self::Students => "/agent/students",
            Self::Submissions => "/agent/submissions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternalSection {
    Dashboard,
    Users,
    Reports,
    Marketing,
    Applications,
    Compliance,
    Cases,
}

impl InternalSection {
    pub const ALL: [InternalSection; 7] = [
        Self::Dashboard,
        Self::Users,
        Self::Reports,
        Self::Marketing,
        Self::Applications,
        Self::Compliance,
        Self::Cases,
    ];

    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "dashboard" => Some(Self::Dashboard),
            "users" => Some(Self::Users),
            "reports" => Some(Self::Reports),
            "marketing" => Some(Self::Marketing),
            "applications" => Some(Self::Applications),
            "compliance" => Some(Self::Compliance),
            "cases" => Some(Self::Cases),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/internal/dashboard",
            Self::Users => "/internal/users",
            Self::Reports => "/internal/reports",
            Self::Marketing => "/internal/marketing",
            Self::Applications => "/internal/applications",
            Self::Compliance => "/internal/compliance",
            Self::Cases => "/internal/cases",
        }
    }

    /// Allow-list for this section, shared with the sidebar entry
    pub fn allowed_roles(&self) -> &'static [Role] {
        INTERNAL_NAV
            .iter()
            .find(|item| item.path == self.path())
            .map(|item| item.roles)
            .unwrap_or(&[])
    }
}

/// A sub-route inside a gated portal area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Section {
    Student(StudentSection),
    Agent(AgentSection),
    Internal(InternalSection),
}

impl Section {
    /// Parse the segment after an area prefix; empty means the area's dashboard
    pub fn resolve(area: PortalArea, segment: &str) -> Option<Self> {
        let segment = if segment.is_empty() {
            "dashboard"
        } else {
            segment
        };

        match area {
            PortalArea::Student => StudentSection::from_segment(segment).map(Self::Student),
            PortalArea::Agent => AgentSection::from_segment(segment).map(Self::Agent),
            PortalArea::Internal => InternalSection::from_segment(segment).map(Self::Internal),
        }
    }

    /// Canonical path of this section
    pub fn path(&self) -> &'static str {
        match self {
            Self::Student(section) => section.path(),
            Self::Agent(section) => section.path(),
            Self::Internal(section) => section.path(),
        }
    }

    /// Section-level allow-list; student and agent areas are gated by the area rule alone
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Self::Student(_) => role == Role::Student,
            Self::Agent(_) => role == Role::Agent,
            Self::Internal(section) => section.allowed_roles().contains(&role),
        }
    }
}

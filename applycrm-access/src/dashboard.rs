//! Dashboard dispatch
//!
//! Which view a permitted target renders. Internal staff share one area and
//! are told apart here by role.

use crate::error::AccessError;
use crate::navigation::{nav_items, AgentSection, InternalSection, NavItem, Section, StudentSection};
use crate::policy::{PortalArea, RouteTarget};
use applycrm_core::{Identity, Role};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuperAdminSection {
    Overview,
    Users,
    Reports,
}

/// Internal dashboard variant, one per staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "dashboard", content = "section", rename_all = "snake_case")]
pub enum InternalDashboard {
    SuperAdmin(SuperAdminSection),
    MarketingOfficer,
    ApplicationOfficer,
    ComplianceOfficer,
    CaseOfficer,
}

/// Pick the internal dashboard for a role
pub fn dispatch_internal(role: Role) -> Result<InternalDashboard, AccessError> {
    match role {
        Role::SuperAdmin => Ok(InternalDashboard::SuperAdmin(SuperAdminSection::Overview)),
        Role::Marketing => Ok(InternalDashboard::MarketingOfficer),
        Role::Application => Ok(InternalDashboard::ApplicationOfficer),
        Role::Compliance => Ok(InternalDashboard::ComplianceOfficer),
        Role::Case => Ok(InternalDashboard::CaseOfficer),
        Role::Student | Role::Agent => Err(AccessError::NotInternal(role)),
    }
}

/// What a rendered portal route shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "portal", content = "view", rename_all = "lowercase")]
pub enum View {
    Student(StudentSection),
    Agent(AgentSection),
    Internal(InternalDashboard),
}

impl View {
    pub fn for_target(target: &RouteTarget, identity: &Identity) -> Result<Self, AccessError> {
        let view = match target.section {
            Section::Student(section) => View::Student(section),
            Section::Agent(section) => View::Agent(section),
            Section::Internal(section) => View::Internal(match section {
                InternalSection::Dashboard => dispatch_internal(identity.role)?,
                InternalSection::Users => InternalDashboard::SuperAdmin(SuperAdminSection::Users),
                InternalSection::Reports => {
                    InternalDashboard::SuperAdmin(SuperAdminSection::Reports)
                }
                InternalSection::Marketing => InternalDashboard::MarketingOfficer,
                InternalSection::Applications => InternalDashboard::ApplicationOfficer,
                InternalSection::Compliance => InternalDashboard::ComplianceOfficer,
                InternalSection::Cases => InternalDashboard::CaseOfficer,
            }),
        };
        Ok(view)
    }
}

/// Everything a portal page needs to render, minus the content itself
#[derive(Debug, Clone, Serialize)]
pub struct PortalView {
    pub area: PortalArea,
    pub path: &'static str,
    pub user: Identity,
    pub nav: Vec<&'static NavItem>,
    pub view: View,
}

impl PortalView {
    pub fn build(target: &RouteTarget, identity: &Identity) -> Result<Self, AccessError> {
        Ok(Self {
            area: target.area,
            path: target.section.path(),
            user: identity.clone(),
            nav: nav_items(identity.role),
            view: View::for_target(target, identity)?,
        })
    }
}

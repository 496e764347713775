//! Route guards
//!
//! Every navigation is checked against a declarative table of path prefixes.
//! Anything not explicitly allowed redirects to the login page; there is no
//! forbidden page, so a denial looks exactly like an anonymous visit.

use crate::navigation::Section;
use applycrm_core::{Identity, Role};
use serde::Serialize;
use tracing::debug;

/// Where every denial sends the visitor
pub const LOGIN_PATH: &str = "/login";

/// Role-gated portion of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalArea {
    Student,
    Agent,
    Internal,
}

impl PortalArea {
    pub fn prefix(&self) -> &'static str {
        match self {
            PortalArea::Student => "/student",
            PortalArea::Agent => "/agent",
            PortalArea::Internal => "/internal",
        }
    }

    /// Where a successful login lands
    pub fn landing_path(&self) -> &'static str {
        match self {
            PortalArea::Student => "/student/dashboard",
            PortalArea::Agent => "/agent/dashboard",
            PortalArea::Internal => "/internal/dashboard",
        }
    }

    /// The area that serves a role
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student => PortalArea::Student,
            Role::Agent => PortalArea::Agent,
            Role::Marketing
            | Role::Application
            | Role::Compliance
            | Role::Case
            | Role::SuperAdmin => PortalArea::Internal,
        }
    }
}

/// Pages reachable without a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicPage {
    Landing,
    Login,
    Register,
}

impl PublicPage {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(PublicPage::Landing),
            LOGIN_PATH => Some(PublicPage::Login),
            "/register" => Some(PublicPage::Register),
            _ => None,
        }
    }
}

/// Path prefix and the roles permitted to render it
#[derive(Debug, Clone, Copy)]
pub struct RouteGuardRule {
    pub area: PortalArea,
    pub prefix: &'static str,
    pub roles: &'static [Role],
    /// Identity must also be an approved agent
    pub requires_approval: bool,
}

impl RouteGuardRule {
    /// Match on whole segments and return the remainder after the prefix
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.prefix)?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    pub fn admits(&self, identity: &Identity) -> bool {
        self.roles.contains(&identity.role)
            && (!self.requires_approval || identity.is_approved_agent())
    }
}

/// One rule per protected prefix
pub static ROUTE_GUARDS: [RouteGuardRule; 3] = [
    RouteGuardRule {
        area: PortalArea::Student,
        prefix: "/student",
        roles: &[Role::Student],
        requires_approval: false,
    },
    RouteGuardRule {
        area: PortalArea::Agent,
        prefix: "/agent",
        roles: &[Role::Agent],
        requires_approval: true,
    },
    RouteGuardRule {
        area: PortalArea::Internal,
        prefix: "/internal",
        roles: &Role::INTERNAL,
        requires_approval: false,
    },
];

/// A permitted gated destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteTarget {
    pub area: PortalArea,
    pub section: Section,
}

/// Outcome of one navigation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Public(PublicPage),
    Render(RouteTarget),
    Redirect(&'static str),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, AccessDecision::Redirect(_))
    }
}

/// Decides render-vs-redirect for every navigation
#[derive(Debug, Clone, Copy)]
pub struct AccessRouter {
    rules: &'static [RouteGuardRule],
}

impl Default for AccessRouter {
    fn default() -> Self {
        Self {
            rules: &ROUTE_GUARDS,
        }
    }
}

impl AccessRouter {
    pub fn new(rules: &'static [RouteGuardRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [RouteGuardRule] {
        self.rules
    }

    /// Evaluate a path against the current identity (if any)
    pub fn decide(&self, identity: Option<&Identity>, path: &str) -> AccessDecision {
        let path = normalize(path);

        if let Some(page) = PublicPage::from_path(path) {
            return AccessDecision::Public(page);
        }

        let Some((rule, rest)) = self
            .rules
            .iter()
            .find_map(|rule| rule.strip(path).map(|rest| (rule, rest)))
        else {
            debug!("No guard rule for {}", path);
            return AccessDecision::Redirect(LOGIN_PATH);
        };

        let Some(identity) = identity else {
            debug!("Anonymous visit to {}", path);
            return AccessDecision::Redirect(LOGIN_PATH);
        };

        if !rule.admits(identity) {
            debug!(
                "Role {} (approved: {:?}) denied {}",
                identity.role, identity.approved, path
            );
            return AccessDecision::Redirect(LOGIN_PATH);
        }

        // Nested sub-routes are a single segment deep
        if rest.contains('/') {
            return AccessDecision::Redirect(LOGIN_PATH);
        }

        match Section::resolve(rule.area, rest) {
            Some(section) if section.allows(identity.role) => AccessDecision::Render(RouteTarget {
                area: rule.area,
                section,
            }),
            _ => {
                debug!("Role {} denied section {}", identity.role, path);
                AccessDecision::Redirect(LOGIN_PATH)
            }
        }
    }

    pub fn is_allowed(&self, identity: Option<&Identity>, path: &str) -> bool {
        self.decide(identity, path).is_allowed()
    }
}

/// Boolean form of the policy for an authenticated identity
pub fn authorize(identity: &Identity, resource: &str) -> bool {
    AccessRouter::default().is_allowed(Some(identity), resource)
}

/// Drop query, fragment and trailing slashes
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

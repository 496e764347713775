//! Authentication and Authorization Module
//!
//! This crate holds the whole access model of the CRM portals:
//! - Credential resolution against a static directory, with a portal-type check
//! - An explicitly passed session holding zero or one identity
//! - Declarative route guards and per-role navigation tables
//! - Dashboard dispatch keyed on role
//! - Sign-up validation for the public portal

pub mod credentials;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod policy;
pub mod registration;
pub mod session;

pub use credentials::{AuthenticationService, CredentialDirectory, CredentialResolver, LoginRequest};
pub use dashboard::{dispatch_internal, InternalDashboard, PortalView, SuperAdminSection, View};
pub use error::{AccessError, AuthError, RegistrationError};
pub use navigation::{nav_items, AgentSection, InternalSection, NavItem, Section, StudentSection};
pub use policy::{
    authorize, AccessDecision, AccessRouter, PortalArea, PublicPage, RouteGuardRule, RouteTarget,
    LOGIN_PATH, ROUTE_GUARDS,
};
pub use registration::{register, AccountType, RegistrationReceipt, RegistrationRequest, COUNTRIES};
pub use session::{login, logout, LoginOutcome, Session, SessionState};

pub use applycrm_core::{Identity, PortalType, Role};

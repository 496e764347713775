//! Descriptors for the pages reachable without a session

use crate::AppState;
use applycrm_access::{AccountType, Identity, PortalType, PublicPage, COUNTRIES, LOGIN_PATH};
use applycrm_core::{demo_accounts, DEMO_PASSWORD};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub label: &'static str,
    pub path: &'static str,
}

/// Sign-in hint shown on the login page in development mode
#[derive(Debug, Clone, Serialize)]
pub struct DemoCredentials {
    pub password: &'static str,
    pub accounts: Vec<Identity>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageDescriptor {
    Landing {
        links: Vec<PageLink>,
    },
    Login {
        portals: [PortalType; 2],
        #[serde(skip_serializing_if = "Option::is_none")]
        demo: Option<DemoCredentials>,
    },
    Register {
        account_types: [AccountType; 2],
        countries: &'static [&'static str],
        redirect: &'static str,
    },
}

impl PageDescriptor {
    pub fn for_page(page: PublicPage, state: &AppState) -> Self {
        match page {
            PublicPage::Landing => PageDescriptor::Landing {
                links: vec![
                    PageLink {
                        label: "Login",
                        path: LOGIN_PATH,
                    },
                    PageLink {
                        label: "Register",
                        path: "/register",
                    },
                ],
            },
            PublicPage::Login => PageDescriptor::Login {
                portals: [PortalType::Public, PortalType::Internal],
                // Only meaningful while the built-in directory is in use
                demo: (state.config.dev_mode && state.config.config_path.is_none()).then(|| {
                    DemoCredentials {
                        password: DEMO_PASSWORD,
                        accounts: demo_accounts(),
                    }
                }),
            },
            PublicPage::Register => PageDescriptor::Register {
                account_types: [AccountType::Student, AccountType::Agent],
                countries: &COUNTRIES,
                redirect: LOGIN_PATH,
            },
        }
    }
}

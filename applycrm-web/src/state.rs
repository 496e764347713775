//! Application state shared by every handler

use crate::{WebConfig, WebResult};
use crate::sessions::SessionStore;
use applycrm_access::{AccessRouter, CredentialDirectory, CredentialResolver};
use applycrm_core::CrmConfig;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Credential lookup for login submissions
    pub resolver: CredentialResolver,
    /// Route guard evaluation
    pub router: AccessRouter,
    /// Sessions keyed by the client's session cookie
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Build state from configuration; without a config file the demo directory is used
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let directory = match &config.config_path {
            Some(path) => {
                let crm_config = CrmConfig::from_file(path)?;
                crm_config.validate()?;
                info!(
                    "Loaded {} accounts from {}",
                    crm_config.directory.accounts.len(),
                    path
                );
                CredentialDirectory::from_config(&crm_config.directory)?
            }
            None => {
                info!("Using demo credential directory");
                CredentialDirectory::demo()
            }
        };

        Ok(Self {
            config,
            resolver: CredentialResolver::new(Arc::new(directory)),
            router: AccessRouter::default(),
            sessions: Arc::new(SessionStore::new()),
        })
    }
}

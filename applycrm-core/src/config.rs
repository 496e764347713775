//! Configuration management

use crate::error::{CrmError, CrmResult, ErrorContext};
use crate::logging::LoggingConfig;
use crate::types::{Identity, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Password shared by every demo account
pub const DEMO_PASSWORD: &str = "demo123";

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrmConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
        }
    }
}

/// Static credential table: known accounts plus the one shared password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub shared_password: String,
    pub accounts: Vec<Identity>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            shared_password: DEMO_PASSWORD.to_string(),
            accounts: demo_accounts(),
        }
    }
}

/// The demo accounts of the prototype portals
pub fn demo_accounts() -> Vec<Identity> {
    vec![
        Identity::new("1", "Rahim Uddin", "student@demo.com", Role::Student),
        Identity::new("2", "Tahmid Ahmed", "agent@demo.com", Role::Agent).with_approval(true),
        Identity::new("3", "Nabila Chowdhury", "marketing@demo.com", Role::Marketing),
        Identity::new("4", "Rafiq Hossain", "application@demo.com", Role::Application),
        Identity::new("5", "Shahana Karim", "compliance@demo.com", Role::Compliance),
        Identity::new("6", "Farhan Rahman", "case@demo.com", Role::Case),
        Identity::new("7", "Super Admin", "admin@demo.com", Role::SuperAdmin),
    ]
}

impl CrmConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CrmResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CrmError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: CrmConfig = toml::from_str(&content).map_err(|e| CrmError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CrmResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CrmError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| CrmError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CrmResult<()> {
        if self.server.port == 0 {
            return Err(crate::validation_error!(
                "Server port must be greater than 0",
                "server.port",
                "config"
            ));
        }

        self.directory.validate()
    }
}

impl DirectoryConfig {
    /// Check that the table can back a credential directory
    pub fn validate(&self) -> CrmResult<()> {
        if self.shared_password.is_empty() {
            return Err(crate::validation_error!(
                "Shared password must not be empty",
                "directory.shared_password",
                "config"
            ));
        }

        let mut emails = HashSet::new();
        let mut ids = HashSet::new();
        for account in &self.accounts {
            if account.email.is_empty() {
                return Err(crate::validation_error!(
                    format!("Account '{}' has an empty email", account.id),
                    "directory.accounts.email",
                    "config"
                ));
            }
            if !emails.insert(account.email.as_str()) {
                return Err(crate::validation_error!(
                    format!("Duplicate account email: {}", account.email),
                    "directory.accounts.email",
                    "config"
                ));
            }
            if !ids.insert(account.id.as_str()) {
                return Err(crate::validation_error!(
                    format!("Duplicate account id: {}", account.id),
                    "directory.accounts.id",
                    "config"
                ));
            }
        }

        Ok(())
    }
}

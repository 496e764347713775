//! ApplyCRM Web Server
//!
//! HTTP front for the portals. Every page navigation is evaluated by the
//! access router; API endpoints cover login, logout, registration and the
//! session-scoped navigation list.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod sessions;
pub mod state;

// Re-export main types
pub use server::CrmServer;
pub use state::AppState;

use applycrm_core::CrmError;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .nest("/api", routes::api_routes())
        // Page navigations, public and gated alike
        .fallback(handlers::navigate)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable development mode
    pub dev_mode: bool,
    /// TOML file holding the credential directory
    pub config_path: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
            config_path: None,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("APPLYCRM_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("APPLYCRM_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            dev_mode: std::env::var("APPLYCRM_DEV_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            config_path: std::env::var("APPLYCRM_CONFIG").ok(),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] CrmError),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

/// Initialize logging for the web server
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "applycrm_web=debug,applycrm_access=info,tower_http=debug".into()),
        )
        .try_init();
}

//! ApplyCRM Core - shared data model and infrastructure
//!
//! Defines the closed role model, the session identity record, configuration,
//! error types and logging setup used by every other ApplyCRM crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;

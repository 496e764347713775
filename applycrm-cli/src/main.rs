//! ApplyCRM CLI - Command-line interface for the access policy
//!
//! Simulates logins and evaluates navigations against the route guards without
//! starting the web server.

use applycrm_access::{
    login, nav_items, AccessDecision, AccessRouter, CredentialDirectory, CredentialResolver,
    Identity, LoginRequest, PortalType, PortalView, Role, Session,
};
use applycrm_core::{init_logging, validation_error, CrmConfig, CrmError, CrmResult, ErrorContext};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "applycrm")]
#[command(about = "Inspect and exercise the ApplyCRM access policy")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and report where the session may go
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Portal the login form is submitted through (public, internal)
        #[arg(long, default_value = "public")]
        portal: PortalType,

        /// Paths to evaluate with the new session
        #[arg(long = "path")]
        paths: Vec<String>,

        /// Print the landing page view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate paths for a role without credentials
    Check {
        /// Role to evaluate (student, agent, marketing, application, compliance, case, superadmin)
        #[arg(short, long)]
        role: Role,

        /// Treat an agent as not yet approved
        #[arg(long)]
        unapproved: bool,

        /// Paths to evaluate
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List the navigation items shown to a role
    Nav {
        #[arg(short, long)]
        role: Role,
    },

    /// Configuration management
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> CrmResult<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    let logging_config = if cli.verbose {
        config.logging.clone().verbose()
    } else {
        config.logging.clone()
    };

    init_logging(&logging_config).map_err(|e| CrmError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting ApplyCRM CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Login {
            email,
            password,
            portal,
            paths,
            json,
        } => handle_login(&config, LoginRequest::new(&email, &password, portal), &paths, json),
        Commands::Check {
            role,
            unapproved,
            paths,
        } => {
            handle_check(role, unapproved, &paths);
            Ok(())
        }
        Commands::Nav { role } => {
            handle_nav(role);
            Ok(())
        }
        Commands::Config {
            init,
            show,
            validate,
        } => handle_config(cli.config.as_ref(), init, show, validate).await,
    }
}

fn load_config(config_path: Option<&PathBuf>) -> CrmResult<CrmConfig> {
    if let Some(path) = config_path {
        return CrmConfig::from_file(path);
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("applycrm").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".applycrm").join("config.toml")),
        Some(PathBuf::from("applycrm.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            return CrmConfig::from_file(path);
        }
    }

    Ok(CrmConfig::default())
}

/// Get the default configuration file path
fn get_config_path() -> CrmResult<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
        .map(|d| d.join("applycrm").join("config.toml"))
        .ok_or_else(|| applycrm_core::config_error!("Unable to locate a configuration directory", "cli"))
}

fn handle_login(
    config: &CrmConfig,
    request: LoginRequest,
    paths: &[String],
    json: bool,
) -> CrmResult<()> {
    let directory = CredentialDirectory::from_config(&config.directory)?;
    let resolver = CredentialResolver::new(Arc::new(directory));
    let router = AccessRouter::default();
    let mut session = Session::new();

    let outcome = login(&mut session, &resolver, &request)
        .map_err(|e| validation_error!(e.user_message(), "credentials", "cli"))?;

    let identity = &outcome.identity;
    println!(
        "Logged in as {} <{}> ({})",
        identity.name,
        identity.email,
        identity.role.display_label()
    );
    println!("Landing page: {}", outcome.redirect);

    if json {
        if let AccessDecision::Render(target) = router.decide(Some(identity), outcome.redirect) {
            let view = PortalView::build(&target, identity).map_err(|e| CrmError::Internal {
                message: e.to_string(),
                source: Some(Box::new(e)),
                context: ErrorContext::new("cli").with_operation("build_view"),
            })?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    for path in paths {
        println!("{}", describe(path, router.decide(session.current(), path)));
    }

    Ok(())
}

fn handle_check(role: Role, unapproved: bool, paths: &[String]) {
    let mut identity = Identity::new("cli", "CLI user", "cli@localhost", role);
    if role == Role::Agent {
        identity = identity.with_approval(!unapproved);
    }

    let router = AccessRouter::default();
    for path in paths {
        println!("{}", describe(path, router.decide(Some(&identity), path)));
    }
}

fn handle_nav(role: Role) {
    println!("Navigation for {}:", role.display_label());
    for item in nav_items(role) {
        println!("  {:<28} {:<22} [{}]", item.path, item.label, item.icon);
    }
}

async fn handle_config(
    config_path: Option<&PathBuf>,
    init: bool,
    show: bool,
    validate: bool,
) -> CrmResult<()> {
    if init {
        let path = match config_path {
            Some(path) => path.clone(),
            None => get_config_path()?,
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        CrmConfig::default().save_to_file(&path)?;
        println!("Configuration initialized at: {}", path.display());
        println!("Edit the [directory] section to change accounts or the shared password.");
    }

    if show {
        let config = load_config(config_path)?;
        let rendered = toml::to_string_pretty(&config).map_err(|e| CrmError::Config {
            message: format!("Failed to render config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli").with_operation("show_config"),
        })?;
        println!("{}", rendered);
    }

    if validate {
        let config = load_config(config_path)?;
        match config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => {
                println!("Configuration validation failed: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}

/// One line per evaluated path
fn describe(path: &str, decision: AccessDecision) -> String {
    match decision {
        AccessDecision::Public(page) => format!("ALLOW {:<28} public page ({:?})", path, page),
        AccessDecision::Render(target) => format!(
            "ALLOW {:<28} {:?} -> {}",
            path,
            target.area,
            target.section.path()
        ),
        AccessDecision::Redirect(to) => format!("DENY  {:<28} redirect {}", path, to),
    }
}

//! ApplyCRM Web Server
//!
//! Serves the student, agent and internal portals behind role-based route guards.

use applycrm_web::server::CrmServerBuilder;
use applycrm_web::{init_logging, WebConfig};
use clap::Parser;

/// ApplyCRM Web Server - role-gated portals for the student application CRM
#[derive(Parser)]
#[command(name = "applycrm-web")]
#[command(about = "Web front for the ApplyCRM portals")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// TOML file with the credential directory
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var(
            "RUST_LOG",
            format!(
                "applycrm_web={level},applycrm_access={level},tower_http=debug",
                level = args.log_level
            ),
        );
    }
    init_logging();

    // Command line arguments override the environment
    let mut config = WebConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config.dev_mode |= args.dev;
    if args.config.is_some() {
        config.config_path = args.config;
    }

    println!("Starting ApplyCRM Web Server");
    println!("Server: http://{}", config.address());
    println!("Development mode: {}", config.dev_mode);
    match &config.config_path {
        Some(path) => println!("Credential directory: {}", path),
        None => println!("Credential directory: built-in demo accounts"),
    }

    let server = match CrmServerBuilder::with_config(config).build() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}

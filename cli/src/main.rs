//! Course enrollment service, CLI server
//!
//! ```sh
//! # Run with default config (~/.config/course-enrollment/config.toml)
//! course-enrollment
//!
//! # Custom config path
//! course-enrollment --config /etc/course-enrollment/config.toml
//!
//! # Override the port
//! course-enrollment --port 8080
//!
//! # Validate config without starting
//! course-enrollment --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use course_enrollment::config::AppConfig;
use course_enrollment::server::{init_tracing, ServerHandle, ServerOptions};

/// Course enrollment REST service.
#[derive(Parser, Debug)]
#[command(
    name = "course-enrollment",
    version,
    about = "Course catalogue and enrollment REST service",
    long_about = "Course enrollment service: user registration and login, \
                  course listing and signup over a JSON REST API.\n\n\
                  Default config: ~/.config/course-enrollment/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "COURSES_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(course_enrollment::default_config_path);

    // `--check` judges the given file, so it never falls back to defaults.
    let (mut config, load_error) = match AppConfig::load_or_default(&config_path, cli.check) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration is invalid: {}", e);
            std::process::exit(1);
        }
    };

    // Log level override has to land before tracing starts.
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config: {}", e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Session TTL : {}s", config.session.ttl_seconds);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    // SIGTERM / SIGINT
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

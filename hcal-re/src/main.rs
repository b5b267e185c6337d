//! hcal-re (Recommendation Engine) - healing audio recommendation service
//!
//! Loads the healing library once at startup and serves catalog browsing
//! and context-driven recommendations to the calendar front end.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hcal_common::config::{resolve_config_source, LoggingConfig, TomlConfig};
use hcal_common::HealingLibrary;
use hcal_re::api::buildinfo::BuildInfo;
use hcal_re::{build_router, AppState};

/// Command-line arguments for hcal-re
#[derive(Parser, Debug)]
#[command(name = "hcal-re")]
#[command(about = "Healing audio recommendation service")]
#[command(version)]
struct Args {
    /// Config file (overrides HCAL_CONFIG and the platform config file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "HCAL_RE_PORT")]
    port: Option<u16>,

    /// Interface to bind
    #[arg(short, long, env = "HCAL_RE_BIND")]
    bind: Option<String>,

    /// Library TOML replacing the embedded catalog
    #[arg(short, long, env = "HCAL_LIBRARY")]
    library: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config decides log level and destination, so it loads before tracing
    let source = resolve_config_source(args.config.as_deref());
    let mut config = TomlConfig::load(&source).context("Failed to load configuration")?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(library) = args.library {
        config.library_path = Some(library);
    }

    init_tracing(&config.logging)?;

    let build = BuildInfo::current();
    info!(
        "Starting HCAL Recommendation Engine (hcal-re) v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );
    match source.path() {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: built-in defaults"),
    }

    let library = match &config.library_path {
        Some(path) => {
            info!("Loading healing library from {}", path.display());
            HealingLibrary::from_path(path)
        }
        None => HealingLibrary::builtin(),
    }
    .context("Failed to load healing library")?;

    let dangling = library.dangling_references().len();
    if dangling > 0 {
        warn!("{} mapping references point at unknown audio ids", dangling);
    }
    info!("✓ Loaded {} audio entries", library.catalog().len());

    let app = build_router(AppState::new(library));

    let listener = tokio::net::TcpListener::bind((config.bind_address.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.bind_address, config.port))?;
    let addr = listener.local_addr()?;
    info!("hcal-re listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// RUST_LOG wins over the configured level; a configured file replaces stderr
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

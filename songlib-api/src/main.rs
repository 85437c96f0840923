//! songlib-api - song catalog HTTP service
//!
//! Startup order: logging, configuration, database (schema + seed data),
//! metadata provider, HTTP server. Missing database URL or port aborts
//! startup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use songlib_common::config::{load_file_tier, ConfigOverrides, ServiceConfig};
use songlib_common::db::{init_database, seed_initial_songs};
use songlib_api::enrichment::provider_from_config;
use songlib_api::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for songlib-api
#[derive(Parser, Debug)]
#[command(name = "songlib-api")]
#[command(about = "Song catalog HTTP service")]
#[command(version)]
struct Args {
    /// sqlx database URL, e.g. sqlite://songs.db?mode=rwc
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "APP_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "APP_HOST")]
    host: Option<String>,

    /// TOML configuration file
    #[arg(short, long, env = "SONGLIB_CONFIG")]
    config: Option<PathBuf>,

    /// Skip inserting the built-in catalog songs
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!(
        "Starting songlib-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let toml_config = load_file_tier(args.config.as_deref())?;
    let overrides = ConfigOverrides {
        database_url: args.database_url,
        host: args.host,
        port: args.port,
        no_seed: args.no_seed,
    };
    let config = match ServiceConfig::resolve(overrides, toml_config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let pool = init_database(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    info!("✓ Database schema ready");

    if config.seed_initial_songs {
        let inserted = seed_initial_songs(&pool)
            .await
            .context("Failed to seed initial songs")?;
        info!("Seeded {} initial songs", inserted);
    }

    let enricher = provider_from_config(&config.enrichment)
        .context("Failed to create metadata client")?;
    match &config.enrichment.base_url {
        Some(url) => info!("Song enrichment via {} (timeout {:?})", url, config.enrichment.timeout()),
        None => info!("No enrichment endpoint configured, songs are stored as submitted"),
    }

    let state = AppState::new(pool, Arc::from(enricher), config.max_page_size);
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("songlib-api listening on http://{}", addr);
    info!("Songs: http://{}/api/v1/songs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

//! pagesd - keeps a tree of static sites in step with the pages branch
//! of a collection of bare git repositories
//!
//! A periodic task runs a full sync over every repository; a webhook
//! listener triggers a fast single-repository sync on each push.

mod webhook;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pages_core::{Config, DeployTree, Settings, SourceTree, SyncEngine};
use webhook::AppState;

/// pagesd: deploy the pages branch of bare git repositories
#[derive(Parser, Debug)]
#[command(name = "pagesd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ~/.config/pagesd/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root of the bare source repositories
    #[arg(long, env = "PAGESD_REPOSITORIES")]
    repositories: Option<PathBuf>,

    /// Root of the deployment directories
    #[arg(long, env = "PAGESD_TARGET")]
    target: Option<PathBuf>,

    /// Publish branch shared by all repositories
    #[arg(long, env = "PAGESD_BRANCH")]
    branch: Option<String>,

    /// Address the webhook listener binds to
    #[arg(long, env = "PAGESD_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Delay between periodic full syncs (e.g. "5m", "90s")
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration with overrides
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };
    let settings = config
        .with_env_overrides()
        .with_cli_overrides(
            cli.repositories,
            cli.target,
            cli.branch,
            cli.listen_addr,
            cli.interval,
        )
        .resolve()?;

    run(settings).await
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        repositories = %settings.repositories.display(),
        target = %settings.target.display(),
        branch = %settings.branch,
        "starting pagesd"
    );

    // The deployment tree is owned by this process; the repositories root
    // belongs to the forge and must already exist.
    std::fs::create_dir_all(&settings.target)
        .with_context(|| format!("failed to create {}", settings.target.display()))?;

    let engine = Arc::new(SyncEngine::new(
        SourceTree::new(&settings.repositories, &settings.branch),
        DeployTree::new(&settings.target),
    ));

    spawn_periodic_sync(engine.clone(), settings.interval);

    let state = AppState {
        engine,
        token: settings.token,
    };

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.listen_addr))?;
    tracing::info!(addr = %settings.listen_addr, "listening for webhooks");

    axum::serve(listener, webhook::router(state))
        .await
        .context("webhook listener failed")
}

/// Run a full sync now and then once per interval, forever
///
/// A failed pass is logged and retried from scratch on the next tick.
fn spawn_periodic_sync(engine: Arc<SyncEngine>, interval: Duration) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = engine.full_sync().await {
                tracing::error!(error = %e, "full sync failed");
            }
            tokio::time::sleep(interval).await;
        }
    });
}

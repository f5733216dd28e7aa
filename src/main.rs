use anyhow::{Context, Result};
use clap::Parser;
use recipe_explorer::{AppConfig, RecoveryMode, build_router, build_state};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Recipe Explorer HTTP API
#[derive(Debug, Parser)]
#[command(name = "recipe_explorer", version, about)]
struct Args {
    /// Interface to bind (overrides APP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides APP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// JSON store file (overrides RECIPES_STORE_PATH)
    #[arg(long)]
    store_path: Option<PathBuf>,

    /// Fail on an unreadable store file instead of starting empty
    #[arg(long)]
    strict_store: bool,

    /// Keep recipes in memory only
    #[arg(long)]
    in_memory: bool,
}

impl Args {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(store_path) = self.store_path {
            config.store_path = store_path;
        }
        if self.strict_store {
            config.recovery = RecoveryMode::Strict;
        }
        config.in_memory |= self.in_memory;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = args.apply(AppConfig::from_env().context("failed to load application configuration")?);

    let state = build_state(&config)?;
    let app = build_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "recipe explorer started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("recipe explorer stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recipe_explorer=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use webook_backend_lib::{
    config::Settings,
    router,
    session::{Clock, MemorySessionStore, SystemClock},
    storage::FlatFileStorage,
    AppState,
};

/// webook user backend
#[derive(Parser, Debug)]
#[command(name = "webook", version, about)]
struct Cli {
    /// Config file (toml, yaml or json); defaults to `config.*` in the
    /// working directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    settings.validate()?;

    init_tracing(&settings.log_level);

    let storage = FlatFileStorage::new(&settings.storage.path).with_context(|| {
        format!("failed to open storage at {}", settings.storage.path.display())
    })?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let sessions = Arc::new(MemorySessionStore::new(clock.clone()));
    let cleanup = sessions
        .clone()
        .spawn_cleanup(Duration::from_secs(settings.session.cleanup_interval_secs));

    let state = Arc::new(AppState::new(storage, &settings, sessions, clock));
    let app = router::create_router(state);

    let addr = settings.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.abort();
    info!("server stopped");
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

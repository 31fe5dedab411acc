//! nsviews exporter
//!
//! - Loads `nsviews.yaml` (or `$NSVIEWS_CONFIG`)
//! - Registers the configured namespaces
//! - Serves the introspection API until Ctrl-C

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use nsviews_exporter::{app_state::AppState, config, error::Result, router};

const DEFAULT_CONFIG_PATH: &str = "nsviews.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "nsviews-exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("NSVIEWS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.exporter.listen_addr()?;

    let state = AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, namespaces = state.registry().len(), "nsviews-exporter starting");
    let listener = TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    state.set_draining();
    tracing::info!("shutdown requested, draining");
}

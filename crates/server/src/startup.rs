use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{runtime, storage::json_file_store::JsonFileStore};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn parse_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.bind_addr())))
}

/// Build the application over the JSON file configured in `cfg.storage`.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store = Arc::new(JsonFileStore::new(cfg.storage.data_file.clone()));
    routes::build_router(AppState::new(store), build_cors())
}

/// Prepare the data directory, bind the configured address and serve until `shutdown` resolves.
pub async fn run_with<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime::ensure_env(&cfg.storage.data_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let addr = parse_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    serve(listener, &cfg, shutdown).await
}

/// Serve on an already bound listener. In-flight requests finish before this returns,
/// so a save in progress is never cut off by shutdown.
pub async fn serve<F>(listener: TcpListener, cfg: &AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(cfg);
    info!(addr = %listener.local_addr()?, data_file = %cfg.storage.data_file.display(), "starting site dashboard server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("site dashboard server drained");
    Ok(())
}

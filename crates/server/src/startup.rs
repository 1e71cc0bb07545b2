use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::runtime;

/// The web client is served from a different origin.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file plus env overrides, validated
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Open the configured store and build the router around it.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let repo = runtime::build_employee_repository(cfg).await?;
    Ok(routes::build_router(build_cors(), ServerState::new(repo)))
}

/// Public entry: build the app and run the HTTP server until `shutdown` resolves
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, backend = ?cfg.storage.backend, "starting employee server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("employee server stopped");
    Ok(())
}

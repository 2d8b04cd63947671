// src/bin/api_server.rs

use std::sync::Arc;
use tracing::{info, Level};
use tramos_api::infra::{config::Config, logging};
use tramos_api::transport;
use tramos_api::{BoundaryLoader, PgTrafficStore, TramoService};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(Level::INFO);

    // --- Store Initialization ---
    info!(target_db = %config.database.redacted(), "Connecting to traffic store");
    let store = PgTrafficStore::connect(&config.database).await?;

    // --- Service Initialization ---
    if !config.geojson_dir.is_dir() {
        tracing::warn!(dir = %config.geojson_dir.display(), "Boundary directory does not exist; every province lookup will fail");
    }
    let boundaries = BoundaryLoader::new(config.geojson_dir.clone());
    let service = TramoService::new(Arc::new(store), boundaries);
    let app_state = transport::http::AppState::new(service);

    // --- API Server Initialization ---
    let app = transport::http::create_app(app_state, &config.cors, config.body_limit_bytes)?
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()));
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        geojson_dir = %config.geojson_dir.display(),
        cors = ?config.cors,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Shutdown signal received");
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

use crate::infra::config::CorsPolicy;
use crate::transport::http::handlers::{fechas, health, tramos};
use crate::transport::http::types::{ErrorBody, HealthResponse, TramosRequest};
use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        tramos::tramos_optimized_handler,
        fechas::fechas_unicas_handler
    ),
    components(schemas(TramosRequest, ErrorBody, HealthResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/d_t/optimized", post(tramos::tramos_optimized_handler))
        .route("/api/fechas-unicas", get(fechas::fechas_unicas_handler))
        .with_state(app_state)
}

/// Router with the cross-origin policy and request body limit applied.
pub fn create_app(
    app_state: crate::transport::http::types::AppState,
    cors: &CorsPolicy,
    body_limit_bytes: usize,
) -> anyhow::Result<Router> {
    Ok(create_router(app_state)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(cors_layer(cors)?))
}

pub fn cors_layer(policy: &CorsPolicy) -> anyhow::Result<CorsLayer> {
    match policy {
        CorsPolicy::Permissive => Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)),
        CorsPolicy::AllowList(origins) => {
            let origins = origins
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin: {}", o))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            // Credentialed CORS cannot use wildcards for methods or headers.
            Ok(CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true))
        }
    }
}

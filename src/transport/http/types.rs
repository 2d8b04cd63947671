use crate::app::tramo_service::TramoService;
use crate::error::TramosError;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TramoService>,
}

impl AppState {
    pub fn new(service: TramoService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct TramosRequest {
    /// Date to match, e.g. `2024-01-01`.
    #[serde(default)]
    pub fecha: Option<String>,
    /// Province name as displayed, e.g. `A Coruña` or `Castilla/La Mancha`.
    #[serde(default)]
    pub provincia: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const TRAMOS_ERROR: &str = "Error obteniendo datos";
pub const FECHAS_ERROR: &str = "Error al obtener fechas";

pub fn json_400(err: JsonRejection, expected: &str) -> TramosError {
    TramosError::Validation(format!("Invalid JSON body: {} (expected: {})", err.body_text(), expected))
}

use crate::transport::http::handlers::common::error_response;
use crate::transport::http::types::{AppState, ErrorBody, FECHAS_ERROR};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/fechas-unicas",
    responses(
        (status = 200, description = "Distinct dates (YYYY-MM-DD), most recent first", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn fechas_unicas_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list_distinct_dates().await {
        Ok(dates) => (StatusCode::OK, Json(dates)).into_response(),
        Err(e) => error_response(&e, FECHAS_ERROR),
    }
}

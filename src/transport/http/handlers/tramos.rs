use crate::transport::http::handlers::common::{error_response, require_field};
use crate::transport::http::types::{json_400, AppState, ErrorBody, TramosRequest, TRAMOS_ERROR};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/d_t/optimized",
    request_body = TramosRequest,
    responses(
        (status = 200, description = "Traffic rows of the province's segments on that date (possibly empty)"),
        (status = 400, description = "Missing fecha/provincia or unreadable body", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn tramos_optimized_handler(
    State(state): State<AppState>,
    payload: Result<Json<TramosRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(r)) => r,
        Err(e) => return error_response(&json_400(e, "{ fecha, provincia }"), TRAMOS_ERROR),
    };
    let (fecha, provincia) = match (
        require_field(request.fecha, "fecha"),
        require_field(request.provincia, "provincia"),
    ) {
        (Ok(f), Ok(p)) => (f, p),
        (Err(e), _) | (_, Err(e)) => return error_response(&e, TRAMOS_ERROR),
    };

    match state.service.tramos_for_province(&fecha, &provincia).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => error_response(&e, TRAMOS_ERROR),
    }
}

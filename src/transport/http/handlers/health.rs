use crate::transport::http::types::{AppState, ErrorResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (store reachable)"),
        (status = 503, description = "Service is unhealthy (store unreachable)", body = ErrorResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let Some(pool) = &state.pool else {
        // Memory backend has nothing to ping.
        return Json(serde_json::json!({ "status": "ok", "storage": "memory" })).into_response();
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => Json(serde_json::json!({ "status": "ok", "storage": "postgres" })).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "health check DB ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "DB ping failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

use crate::transport::http::types::{ApiError, AppState, ErrorResponse, LoginRequest, TokenResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    if !state
        .token_issuer
        .check_credentials(&request.username, &request.password)
    {
        tracing::info!(username = %request.username, "rejected login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid credentials".to_string(),
            }),
        )
            .into_response();
    }

    match state.token_issuer.issue(&request.username) {
        Ok(token) => Json(TokenResponse { token }).into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}

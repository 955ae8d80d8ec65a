use crate::domain::entity::Country;
use crate::domain::validate;
use crate::transport::http::types::{
    ApiError, AppState, ErrorResponse, SavedCountry, ValidationErrorResponse,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/api/v1/country",
    responses(
        (status = 200, description = "All countries", body = Vec<Country>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_all_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Country>>, ApiError> {
    Ok(Json(state.countries.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/country/{countryId}",
    params(("countryId" = i32, Path, description = "Country primary identifier")),
    responses(
        (status = 200, description = "Country found", body = Country),
        (status = 404, description = "No such country", body = ErrorResponse)
    )
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(country_id): Path<i32>,
) -> Result<Json<Country>, ApiError> {
    Ok(Json(state.countries.get(country_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/country",
    request_body = Country,
    responses(
        (status = 200, description = "Country saved", body = SavedCountry),
        (status = 400, description = "Validation failure", body = ValidationErrorResponse),
        (status = 404, description = "Update of a missing id", body = ErrorResponse)
    )
)]
pub async fn save_handler(
    State(state): State<AppState>,
    Json(country): Json<Country>,
) -> Result<Json<SavedCountry>, ApiError> {
    validate::validate_country(&country)?;
    let country_id = state.countries.save(country).await?;
    Ok(Json(SavedCountry { country_id }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/country/{countryId}",
    params(("countryId" = i32, Path, description = "Country primary identifier")),
    responses(
        (status = 200, description = "Country deleted (contacts cascade)"),
        (status = 404, description = "No such country", body = ErrorResponse)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(country_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.countries.delete(country_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/country/{countryId}/company-statistics",
    params(("countryId" = i32, Path, description = "Country primary identifier")),
    responses(
        (status = 200, description = "Contact count per company name; {} when the country has no contacts"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn company_statistics_handler(
    State(state): State<AppState>,
    Path(country_id): Path<i32>,
) -> Result<Json<HashMap<String, i64>>, ApiError> {
    Ok(Json(state.countries.company_statistics(country_id).await?))
}

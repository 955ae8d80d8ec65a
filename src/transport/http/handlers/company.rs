use crate::domain::entity::Company;
use crate::domain::validate;
use crate::transport::http::types::{
    ApiError, AppState, ErrorResponse, PageQuery, PaginatedCompanies, SavedCompany,
    ValidationErrorResponse,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/v1/company",
    responses(
        (status = 200, description = "All companies", body = Vec<Company>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_all_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, ApiError> {
    Ok(Json(state.companies.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/company/{companyId}",
    params(("companyId" = i32, Path, description = "Company primary identifier")),
    responses(
        (status = 200, description = "Company found", body = Company),
        (status = 404, description = "No such company", body = ErrorResponse)
    )
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(company_id): Path<i32>,
) -> Result<Json<Company>, ApiError> {
    Ok(Json(state.companies.get(company_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/company",
    request_body = Company,
    responses(
        (status = 200, description = "Company saved", body = SavedCompany),
        (status = 400, description = "Validation failure", body = ValidationErrorResponse),
        (status = 404, description = "Update of a missing id", body = ErrorResponse)
    )
)]
pub async fn save_handler(
    State(state): State<AppState>,
    Json(company): Json<Company>,
) -> Result<Json<SavedCompany>, ApiError> {
    validate::validate_company(&company)?;
    let company_id = state.companies.save(company).await?;
    Ok(Json(SavedCompany { company_id }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/company/{companyId}",
    params(("companyId" = i32, Path, description = "Company primary identifier")),
    responses(
        (status = 200, description = "Company deleted (contacts cascade)"),
        (status = 404, description = "No such company", body = ErrorResponse)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(company_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.companies.delete(company_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/company/page",
    params(
        ("pageNumber" = Option<i64>, Query, description = "1-based page number (default 1)"),
        ("pageSize" = Option<i64>, Query, description = "Rows per page (default 2)")
    ),
    responses(
        (status = 200, description = "One page of companies", body = PaginatedCompanies),
        (status = 400, description = "pageNumber or pageSize below 1", body = ValidationErrorResponse)
    )
)]
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedCompanies>, ApiError> {
    let page_number = query.page_number.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(2);

    let data = state.companies.get_page(page_number, page_size).await?;
    let total_records = state.companies.total_count().await?;
    let total_pages = (total_records + page_size - 1) / page_size;

    Ok(Json(PaginatedCompanies {
        page_number,
        page_size,
        total_pages,
        total_records,
        data,
    }))
}

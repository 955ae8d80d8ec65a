use crate::app::{CompanyService, ContactService, CountryService};
use crate::auth::TokenIssuer;
use crate::domain::entity::Company;
use crate::domain::error::{Error, FieldFailure};
use crate::storage::repo::Repositories;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub companies: CompanyService,
    pub contacts: ContactService,
    pub countries: CountryService,
    pub token_issuer: Arc<TokenIssuer>,
    /// Present only on the Postgres backend; used by the health check.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(repos: Repositories, token_issuer: Arc<TokenIssuer>, pool: Option<PgPool>) -> Self {
        AppState {
            companies: CompanyService::new(repos.clone()),
            contacts: ContactService::new(repos.clone()),
            countries: CountryService::new(repos),
            token_issuer,
            pool,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedCompany {
    pub company_id: i32,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedContact {
    pub contact_id: i32,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedCountry {
    pub country_id: i32,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub page_number: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedCompanies {
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_records: i64,
    pub data: Vec<Company>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilterQuery {
    #[serde(default)]
    pub company_id: Option<i32>,
    #[serde(default)]
    pub country_id: Option<i32>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldFailure>,
}

/// Translates the domain error taxonomy to HTTP status codes. This is the
/// only place that mapping happens; store and unexpected failures are
/// logged with full detail and surfaced as a sanitized 500.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::Validation(failures) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse { errors: failures }),
            )
                .into_response(),
            err @ Error::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            Error::Store(err) => {
                tracing::error!(error = %err, "storage operation failed");
                internal_error()
            }
            Error::Unexpected(err) => {
                tracing::error!(error = ?err, "unexpected failure");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}

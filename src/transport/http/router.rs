use crate::domain::entity::{Company, Contact, Country};
use crate::domain::error::FieldFailure;
use crate::transport::http::handlers::{auth, company, contact, country, health};
use crate::transport::http::types::{
    AppState, ContactFilterQuery, ErrorResponse, LoginRequest, PageQuery, PaginatedCompanies,
    SavedCompany, SavedContact, SavedCountry, TokenResponse, ValidationErrorResponse,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        auth::login_handler,
        company::get_all_handler,
        company::get_handler,
        company::save_handler,
        company::delete_handler,
        company::page_handler,
        contact::get_all_handler,
        contact::get_handler,
        contact::save_handler,
        contact::delete_handler,
        contact::with_company_and_country_handler,
        contact::filter_handler,
        country::get_all_handler,
        country::get_handler,
        country::save_handler,
        country::delete_handler,
        country::company_statistics_handler
    ),
    components(schemas(
        Company,
        Contact,
        Country,
        LoginRequest,
        TokenResponse,
        SavedCompany,
        SavedContact,
        SavedCountry,
        PageQuery,
        PaginatedCompanies,
        ContactFilterQuery,
        ErrorResponse,
        ValidationErrorResponse,
        FieldFailure
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/auth/login", post(auth::login_handler))
        .route(
            "/api/v1/company",
            get(company::get_all_handler).post(company::save_handler),
        )
        .route("/api/v1/company/page", get(company::page_handler))
        .route(
            "/api/v1/company/:company_id",
            get(company::get_handler).delete(company::delete_handler),
        )
        .route(
            "/api/v1/contact",
            get(contact::get_all_handler).post(contact::save_handler),
        )
        .route(
            "/api/v1/contact/with-company-and-country",
            get(contact::with_company_and_country_handler),
        )
        .route("/api/v1/contact/filter", get(contact::filter_handler))
        .route(
            "/api/v1/contact/:contact_id",
            get(contact::get_handler).delete(contact::delete_handler),
        )
        .route(
            "/api/v1/country",
            get(country::get_all_handler).post(country::save_handler),
        )
        .route(
            "/api/v1/country/:country_id",
            get(country::get_handler).delete(country::delete_handler),
        )
        .route(
            "/api/v1/country/:country_id/company-statistics",
            get(country::company_statistics_handler),
        )
        .with_state(app_state)
}

use crate::domain::entity::Contact;
use crate::domain::validate;
use crate::transport::http::types::{
    ApiError, AppState, ContactFilterQuery, ErrorResponse, SavedContact, ValidationErrorResponse,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/v1/contact",
    responses(
        (status = 200, description = "All contacts", body = Vec<Contact>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_all_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/contact/{contactId}",
    params(("contactId" = i32, Path, description = "Contact primary identifier")),
    responses(
        (status = 200, description = "Contact found", body = Contact),
        (status = 404, description = "No such contact", body = ErrorResponse)
    )
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(contact_id): Path<i32>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.get(contact_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = Contact,
    responses(
        (status = 200, description = "Contact saved", body = SavedContact),
        (status = 400, description = "Validation failure", body = ValidationErrorResponse),
        (status = 404, description = "Referenced company/country/contact missing", body = ErrorResponse)
    )
)]
pub async fn save_handler(
    State(state): State<AppState>,
    Json(contact): Json<Contact>,
) -> Result<Json<SavedContact>, ApiError> {
    validate::validate_contact(&contact)?;
    let contact_id = state.contacts.save(contact).await?;
    Ok(Json(SavedContact { contact_id }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/contact/{contactId}",
    params(("contactId" = i32, Path, description = "Contact primary identifier")),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 404, description = "No such contact", body = ErrorResponse)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(contact_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.contacts.delete(contact_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/contact/with-company-and-country",
    responses(
        (status = 200, description = "Contacts with company and country populated", body = Vec<Contact>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn with_company_and_country_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.get_all_with_company_and_country().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/contact/filter",
    params(
        ("companyId" = Option<i32>, Query, description = "Restrict to one company"),
        ("countryId" = Option<i32>, Query, description = "Restrict to one country")
    ),
    responses(
        (status = 200, description = "Matching contacts", body = Vec<Contact>),
        (status = 404, description = "A supplied filter id does not exist", body = ErrorResponse)
    )
)]
pub async fn filter_handler(
    State(state): State<AppState>,
    Query(query): Query<ContactFilterQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state
        .contacts
        .filter(query.company_id, query.country_id)
        .await?;
    Ok(Json(contacts))
}

//! Error taxonomy shared by the storage, service, and HTTP layers.
//!
//! Validators and repositories raise typed errors; only the HTTP layer
//! translates them to status codes (400/404/500).

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldFailure {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum Error {
    /// One or more field-level validation failures. The write is rejected
    /// before touching the store.
    #[error("validation failed ({} error(s))", .0.len())]
    Validation(Vec<FieldFailure>),

    /// A referenced primary or foreign key does not exist.
    #[error("{entity} with ID {id} not found.")]
    NotFound { entity: &'static str, id: i32 },

    /// The underlying relational operation failed.
    #[error("storage error: {0}")]
    Store(#[from] sqlx::Error),

    /// Anything uncategorized; logged with full detail, surfaced generically.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Error::NotFound { entity, id }
    }
}

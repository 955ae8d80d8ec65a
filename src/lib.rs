pub mod app;
pub mod auth;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{CompanyService, ContactService, CountryService};
pub use auth::TokenIssuer;
pub use domain::entity::{Company, Contact, Country};
pub use domain::error::{Error, FieldFailure};
pub use storage::repo::Repositories;

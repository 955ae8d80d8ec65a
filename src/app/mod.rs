//! Domain services, one per entity.
//!
//! Each service mirrors its repository surface 1:1 and delegates through
//! the [`Repositories`](crate::storage::repo::Repositories) registry.
//! They carry no business rules today; they exist as the seam where rules
//! would be injected, and as the unit the HTTP layer depends on so the
//! persistence choice can change without touching endpoints.

pub mod company;
pub mod contact;
pub mod country;

pub use company::CompanyService;
pub use contact::ContactService;
pub use country::CountryService;

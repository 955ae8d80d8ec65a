pub mod memory;
pub mod postgres;
pub mod repo;

pub use repo::{CompanyRepository, ContactRepository, CountryRepository, Repositories, Repository};

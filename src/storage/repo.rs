//! Repository traits and the startup-time registry that hands them out.
//!
//! This is the seam between the service layer and the relational store:
//! services ask `Repositories` for a capability and never construct
//! persistence objects directly. Backends live in [`super::postgres`]
//! (production) and [`super::memory`] (local dev / tests).

use crate::domain::entity::{Company, Contact, Country};
use crate::domain::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Base CRUD surface shared by every entity.
///
/// `save` is insert-or-update: an id `<= 0` inserts and returns the newly
/// assigned id; an id `> 0` must reference an existing row (NotFound
/// otherwise) and updates it in place.
#[async_trait]
pub trait Repository<E>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<E>>;

    /// Fails with NotFound if no row matches. This policy is uniform
    /// across entities; there is no null-on-missing variant.
    async fn get(&self, id: i32) -> Result<E>;

    async fn save(&self, entity: E) -> Result<i32>;

    /// Fails with NotFound if the row is absent. Deleting a Company or
    /// Country cascades to the Contacts referencing it.
    async fn delete(&self, id: i32) -> Result<()>;
}

#[async_trait]
pub trait CompanyRepository: Repository<Company> {
    /// Rows `[(page_number-1)*page_size, page_number*page_size)` in
    /// primary-key order. Parameter validation happens in the service
    /// layer; backends saturate the offset computation, so a window past
    /// the representable range yields an empty page rather than wrapping.
    async fn get_page(&self, page_number: i64, page_size: i64) -> Result<Vec<Company>>;

    async fn total_count(&self) -> Result<i64>;
}

#[async_trait]
pub trait ContactRepository: Repository<Contact> {
    /// Every contact with its company and country populated (eager join).
    async fn get_all_with_company_and_country(&self) -> Result<Vec<Contact>>;

    /// Logical AND over the filters that are present. A supplied id that
    /// references no row fails with NotFound rather than matching nothing.
    async fn filter(&self, company_id: Option<i32>, country_id: Option<i32>)
        -> Result<Vec<Contact>>;
}

#[async_trait]
pub trait CountryRepository: Repository<Country> {
    /// Contacts of the given country grouped by company name, counted per
    /// group. Empty map when the country has no contacts (not an error).
    async fn company_statistics(&self, country_id: i32) -> Result<HashMap<String, i64>>;
}

/// Marker for types that have a repository in the registry; enables the
/// generic `Repositories::crud::<E>()` lookup.
pub trait Entity: Sized + Send + Sync + 'static {
    /// Display name used in NotFound messages ("Company", "Contact", ...).
    const NAME: &'static str;

    fn crud(repos: &Repositories) -> Arc<dyn Repository<Self>>;
}

/// Explicit repository factory, populated once at startup.
///
/// Replaces a service-locator container lookup with a plain registry:
/// named accessors return the extended per-entity surface, `crud` returns
/// the base surface keyed by entity type.
#[derive(Clone)]
pub struct Repositories {
    companies: Arc<dyn CompanyRepository>,
    contacts: Arc<dyn ContactRepository>,
    countries: Arc<dyn CountryRepository>,
    company_crud: Arc<dyn Repository<Company>>,
    contact_crud: Arc<dyn Repository<Contact>>,
    country_crud: Arc<dyn Repository<Country>>,
}

impl Repositories {
    pub fn new<Com, Con, Cou>(companies: Arc<Com>, contacts: Arc<Con>, countries: Arc<Cou>) -> Self
    where
        Com: CompanyRepository + 'static,
        Con: ContactRepository + 'static,
        Cou: CountryRepository + 'static,
    {
        let company_crud: Arc<dyn Repository<Company>> = companies.clone();
        let contact_crud: Arc<dyn Repository<Contact>> = contacts.clone();
        let country_crud: Arc<dyn Repository<Country>> = countries.clone();
        Repositories {
            companies,
            contacts,
            countries,
            company_crud,
            contact_crud,
            country_crud,
        }
    }

    pub fn companies(&self) -> Arc<dyn CompanyRepository> {
        self.companies.clone()
    }

    pub fn contacts(&self) -> Arc<dyn ContactRepository> {
        self.contacts.clone()
    }

    pub fn countries(&self) -> Arc<dyn CountryRepository> {
        self.countries.clone()
    }

    /// Generic lookup by entity type: returns the base CRUD surface.
    pub fn crud<E: Entity>(&self) -> Arc<dyn Repository<E>> {
        E::crud(self)
    }
}

impl Entity for Company {
    const NAME: &'static str = "Company";

    fn crud(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        repos.company_crud.clone()
    }
}

impl Entity for Contact {
    const NAME: &'static str = "Contact";

    fn crud(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        repos.contact_crud.clone()
    }
}

impl Entity for Country {
    const NAME: &'static str = "Country";

    fn crud(repos: &Repositories) -> Arc<dyn Repository<Self>> {
        repos.country_crud.clone()
    }
}

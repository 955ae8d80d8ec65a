//! In-process storage backend.
//!
//! Implements the same repository contract as the Postgres backend over a
//! shared, mutex-guarded table set, including cascade deletes and
//! foreign-key existence checks. Used for local development
//! (`STORAGE_BACKEND=memory`) and by the test suite.

use crate::domain::entity::{Company, Contact, Country};
use crate::domain::error::{Error, Result};
use crate::storage::repo::{
    CompanyRepository, ContactRepository, CountryRepository, Entity, Repositories, Repository,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Tables {
    companies: BTreeMap<i32, Company>,
    contacts: BTreeMap<i32, Contact>,
    countries: BTreeMap<i32, Country>,
    next_company_id: i32,
    next_contact_id: i32,
    next_country_id: i32,
}

/// Shared table set; one instance backs all three repositories so cascade
/// deletes and FK checks see a consistent view.
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(MemoryStore {
            tables: Mutex::new(Tables {
                next_company_id: 1,
                next_contact_id: 1,
                next_country_id: 1,
                ..Tables::default()
            }),
        })
    }
}

/// Builds the repository registry over a fresh in-process store.
pub fn repositories() -> Repositories {
    let store = MemoryStore::new();
    Repositories::new(
        Arc::new(MemCompanyRepository { store: store.clone() }),
        Arc::new(MemContactRepository { store: store.clone() }),
        Arc::new(MemCountryRepository { store }),
    )
}

pub struct MemCompanyRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl Repository<Company> for MemCompanyRepository {
    async fn get_all(&self) -> Result<Vec<Company>> {
        let tables = self.store.tables.lock().await;
        Ok(tables.companies.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Company> {
        let tables = self.store.tables.lock().await;
        tables
            .companies
            .get(&id)
            .cloned()
            .ok_or(Error::not_found(Company::NAME, id))
    }

    async fn save(&self, mut company: Company) -> Result<i32> {
        let mut tables = self.store.tables.lock().await;
        if company.company_id > 0 {
            if !tables.companies.contains_key(&company.company_id) {
                return Err(Error::not_found(Company::NAME, company.company_id));
            }
        } else {
            company.company_id = tables.next_company_id;
            tables.next_company_id += 1;
        }
        let id = company.company_id;
        tables.companies.insert(id, company);
        Ok(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut tables = self.store.tables.lock().await;
        if tables.companies.remove(&id).is_none() {
            return Err(Error::not_found(Company::NAME, id));
        }
        tables.contacts.retain(|_, c| c.company_id != id);
        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for MemCompanyRepository {
    async fn get_page(&self, page_number: i64, page_size: i64) -> Result<Vec<Company>> {
        let tables = self.store.tables.lock().await;
        // Saturate rather than wrap; an absurd window yields an empty page.
        let skip = page_number
            .saturating_sub(1)
            .saturating_mul(page_size)
            .max(0) as usize;
        Ok(tables
            .companies
            .values()
            .skip(skip)
            .take(page_size.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn total_count(&self) -> Result<i64> {
        let tables = self.store.tables.lock().await;
        Ok(tables.companies.len() as i64)
    }
}

pub struct MemContactRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl Repository<Contact> for MemContactRepository {
    async fn get_all(&self) -> Result<Vec<Contact>> {
        let tables = self.store.tables.lock().await;
        Ok(tables.contacts.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Contact> {
        let tables = self.store.tables.lock().await;
        tables
            .contacts
            .get(&id)
            .cloned()
            .ok_or(Error::not_found(Contact::NAME, id))
    }

    async fn save(&self, mut contact: Contact) -> Result<i32> {
        let mut tables = self.store.tables.lock().await;
        if !tables.companies.contains_key(&contact.company_id) {
            return Err(Error::not_found(Company::NAME, contact.company_id));
        }
        if !tables.countries.contains_key(&contact.country_id) {
            return Err(Error::not_found(Country::NAME, contact.country_id));
        }
        if contact.contact_id > 0 {
            if !tables.contacts.contains_key(&contact.contact_id) {
                return Err(Error::not_found(Contact::NAME, contact.contact_id));
            }
        } else {
            contact.contact_id = tables.next_contact_id;
            tables.next_contact_id += 1;
        }
        // Rows hold scalar columns only; joins populate the nested parents.
        contact.company = None;
        contact.country = None;
        let id = contact.contact_id;
        tables.contacts.insert(id, contact);
        Ok(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut tables = self.store.tables.lock().await;
        if tables.contacts.remove(&id).is_none() {
            return Err(Error::not_found(Contact::NAME, id));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for MemContactRepository {
    async fn get_all_with_company_and_country(&self) -> Result<Vec<Contact>> {
        let tables = self.store.tables.lock().await;
        Ok(tables
            .contacts
            .values()
            .map(|c| {
                let mut contact = c.clone();
                contact.company = tables.companies.get(&c.company_id).cloned();
                contact.country = tables.countries.get(&c.country_id).cloned();
                contact
            })
            .collect())
    }

    async fn filter(
        &self,
        company_id: Option<i32>,
        country_id: Option<i32>,
    ) -> Result<Vec<Contact>> {
        let tables = self.store.tables.lock().await;
        if let Some(id) = company_id {
            if !tables.companies.contains_key(&id) {
                return Err(Error::not_found(Company::NAME, id));
            }
        }
        if let Some(id) = country_id {
            if !tables.countries.contains_key(&id) {
                return Err(Error::not_found(Country::NAME, id));
            }
        }
        Ok(tables
            .contacts
            .values()
            .filter(|c| company_id.map_or(true, |id| c.company_id == id))
            .filter(|c| country_id.map_or(true, |id| c.country_id == id))
            .cloned()
            .collect())
    }
}

pub struct MemCountryRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl Repository<Country> for MemCountryRepository {
    async fn get_all(&self) -> Result<Vec<Country>> {
        let tables = self.store.tables.lock().await;
        Ok(tables.countries.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Country> {
        let tables = self.store.tables.lock().await;
        tables
            .countries
            .get(&id)
            .cloned()
            .ok_or(Error::not_found(Country::NAME, id))
    }

    async fn save(&self, mut country: Country) -> Result<i32> {
        let mut tables = self.store.tables.lock().await;
        if country.country_id > 0 {
            if !tables.countries.contains_key(&country.country_id) {
                return Err(Error::not_found(Country::NAME, country.country_id));
            }
        } else {
            country.country_id = tables.next_country_id;
            tables.next_country_id += 1;
        }
        let id = country.country_id;
        tables.countries.insert(id, country);
        Ok(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut tables = self.store.tables.lock().await;
        if tables.countries.remove(&id).is_none() {
            return Err(Error::not_found(Country::NAME, id));
        }
        tables.contacts.retain(|_, c| c.country_id != id);
        Ok(())
    }
}

#[async_trait]
impl CountryRepository for MemCountryRepository {
    async fn company_statistics(&self, country_id: i32) -> Result<HashMap<String, i64>> {
        let tables = self.store.tables.lock().await;
        let mut stats: HashMap<String, i64> = HashMap::new();
        for contact in tables.contacts.values() {
            if contact.country_id != country_id {
                continue;
            }
            if let Some(company) = tables.companies.get(&contact.company_id) {
                *stats.entry(company.company_name.clone()).or_insert(0) += 1;
            }
        }
        Ok(stats)
    }
}

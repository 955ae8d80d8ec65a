use crate::domain::entity::Country;
use crate::domain::error::Result;
use crate::storage::repo::Repositories;
use std::collections::HashMap;

#[derive(Clone)]
pub struct CountryService {
    repos: Repositories,
}

impl CountryService {
    pub fn new(repos: Repositories) -> Self {
        CountryService { repos }
    }

    pub async fn get_all(&self) -> Result<Vec<Country>> {
        self.repos.countries().get_all().await
    }

    pub async fn get(&self, country_id: i32) -> Result<Country> {
        self.repos.countries().get(country_id).await
    }

    pub async fn save(&self, country: Country) -> Result<i32> {
        self.repos.countries().save(country).await
    }

    pub async fn delete(&self, country_id: i32) -> Result<()> {
        self.repos.countries().delete(country_id).await
    }

    pub async fn company_statistics(&self, country_id: i32) -> Result<HashMap<String, i64>> {
        self.repos.countries().company_statistics(country_id).await
    }
}

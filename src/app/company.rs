use crate::domain::entity::Company;
use crate::domain::error::Result;
use crate::domain::validate;
use crate::storage::repo::Repositories;

#[derive(Clone)]
pub struct CompanyService {
    repos: Repositories,
}

impl CompanyService {
    pub fn new(repos: Repositories) -> Self {
        CompanyService { repos }
    }

    pub async fn get_all(&self) -> Result<Vec<Company>> {
        self.repos.companies().get_all().await
    }

    pub async fn get(&self, company_id: i32) -> Result<Company> {
        self.repos.companies().get(company_id).await
    }

    pub async fn save(&self, company: Company) -> Result<i32> {
        self.repos.companies().save(company).await
    }

    pub async fn delete(&self, company_id: i32) -> Result<()> {
        self.repos.companies().delete(company_id).await
    }

    /// Page parameters below 1 are rejected, never clamped.
    pub async fn get_page(&self, page_number: i64, page_size: i64) -> Result<Vec<Company>> {
        validate::validate_page_params(page_number, page_size)?;
        self.repos.companies().get_page(page_number, page_size).await
    }

    pub async fn total_count(&self) -> Result<i64> {
        self.repos.companies().total_count().await
    }
}

use crate::domain::entity::Contact;
use crate::domain::error::Result;
use crate::storage::repo::Repositories;

#[derive(Clone)]
pub struct ContactService {
    repos: Repositories,
}

impl ContactService {
    pub fn new(repos: Repositories) -> Self {
        ContactService { repos }
    }

    pub async fn get_all(&self) -> Result<Vec<Contact>> {
        self.repos.contacts().get_all().await
    }

    pub async fn get(&self, contact_id: i32) -> Result<Contact> {
        self.repos.contacts().get(contact_id).await
    }

    pub async fn save(&self, contact: Contact) -> Result<i32> {
        self.repos.contacts().save(contact).await
    }

    pub async fn delete(&self, contact_id: i32) -> Result<()> {
        self.repos.contacts().delete(contact_id).await
    }

    pub async fn get_all_with_company_and_country(&self) -> Result<Vec<Contact>> {
        self.repos.contacts().get_all_with_company_and_country().await
    }

    pub async fn filter(
        &self,
        company_id: Option<i32>,
        country_id: Option<i32>,
    ) -> Result<Vec<Contact>> {
        self.repos.contacts().filter(company_id, country_id).await
    }
}

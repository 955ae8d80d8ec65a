//! Postgres storage backend (sqlx).
//!
//! Row mapping is done with runtime queries and `try_get`; multi-step
//! writes (existence check + insert/update) run inside a single
//! transaction so concurrent saves on the same id cannot interleave.
//! Cascade deletion of dependent contacts is declared on the foreign
//! keys, so `DELETE` on a parent row is a single statement.

use crate::domain::entity::{Company, Contact, Country};
use crate::domain::error::{Error, Result};
use crate::storage::repo::{
    CompanyRepository, ContactRepository, CountryRepository, Entity, Repositories, Repository,
};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;

pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the three tables if they do not exist yet. Contacts reference
/// their parents with `ON DELETE CASCADE`, which is what gives parent
/// deletes their cascade semantics.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS companies (
            company_id SERIAL PRIMARY KEY,
            company_name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS countries (
            country_id SERIAL PRIMARY KEY,
            country_name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS contacts (
            contact_id SERIAL PRIMARY KEY,
            contact_name TEXT NOT NULL,
            company_id INTEGER NOT NULL
                REFERENCES companies (company_id) ON DELETE CASCADE,
            country_id INTEGER NOT NULL
                REFERENCES countries (country_id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Builds the repository registry over a connected pool.
pub fn repositories(pool: PgPool) -> Repositories {
    Repositories::new(
        Arc::new(PgCompanyRepository { pool: pool.clone() }),
        Arc::new(PgContactRepository { pool: pool.clone() }),
        Arc::new(PgCountryRepository { pool }),
    )
}

async fn exists<'c, E>(executor: E, sql: &str, id: i32) -> sqlx::Result<bool>
where
    E: sqlx::Executor<'c, Database = sqlx::Postgres>,
{
    let row = sqlx::query(sql).bind(id).fetch_optional(executor).await?;
    Ok(row.is_some())
}

const COMPANY_EXISTS: &str = "SELECT 1 FROM companies WHERE company_id = $1";
const CONTACT_EXISTS: &str = "SELECT 1 FROM contacts WHERE contact_id = $1";
const COUNTRY_EXISTS: &str = "SELECT 1 FROM countries WHERE country_id = $1";

fn company_from_row(row: &PgRow) -> sqlx::Result<Company> {
    Ok(Company {
        company_id: row.try_get("company_id")?,
        company_name: row.try_get("company_name")?,
    })
}

fn country_from_row(row: &PgRow) -> sqlx::Result<Country> {
    Ok(Country {
        country_id: row.try_get("country_id")?,
        country_name: row.try_get("country_name")?,
    })
}

fn contact_from_row(row: &PgRow) -> sqlx::Result<Contact> {
    Ok(Contact {
        contact_id: row.try_get("contact_id")?,
        contact_name: row.try_get("contact_name")?,
        company_id: row.try_get("company_id")?,
        country_id: row.try_get("country_id")?,
        company: None,
        country: None,
    })
}

pub struct PgCompanyRepository {
    pool: PgPool,
}

#[async_trait]
impl Repository<Company> for PgCompanyRepository {
    async fn get_all(&self) -> Result<Vec<Company>> {
        let rows = sqlx::query(
            "SELECT company_id, company_name FROM companies ORDER BY company_id",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut companies = Vec::with_capacity(rows.len());
        for row in &rows {
            companies.push(company_from_row(row)?);
        }
        Ok(companies)
    }

    async fn get(&self, id: i32) -> Result<Company> {
        let row = sqlx::query(
            "SELECT company_id, company_name FROM companies WHERE company_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(company_from_row(&row)?),
            None => Err(Error::not_found(Company::NAME, id)),
        }
    }

    async fn save(&self, company: Company) -> Result<i32> {
        let mut tx = self.pool.begin().await?;
        let id = if company.company_id > 0 {
            if !exists(&mut *tx, COMPANY_EXISTS, company.company_id).await? {
                return Err(Error::not_found(Company::NAME, company.company_id));
            }
            sqlx::query("UPDATE companies SET company_name = $2 WHERE company_id = $1")
                .bind(company.company_id)
                .bind(&company.company_name)
                .execute(&mut *tx)
                .await?;
            company.company_id
        } else {
            let row = sqlx::query(
                "INSERT INTO companies (company_name) VALUES ($1) RETURNING company_id",
            )
            .bind(&company.company_name)
            .fetch_one(&mut *tx)
            .await?;
            row.try_get("company_id")?
        };
        tx.commit().await?;
        Ok(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM companies WHERE company_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found(Company::NAME, id));
        }
        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn get_page(&self, page_number: i64, page_size: i64) -> Result<Vec<Company>> {
        let rows = sqlx::query(
            "SELECT company_id, company_name FROM companies
             ORDER BY company_id LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind(page_number.saturating_sub(1).saturating_mul(page_size).max(0))
        .fetch_all(&self.pool)
        .await?;
        let mut companies = Vec::with_capacity(rows.len());
        for row in &rows {
            companies.push(company_from_row(row)?);
        }
        Ok(companies)
    }

    async fn total_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM companies")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }
}

pub struct PgContactRepository {
    pool: PgPool,
}

#[async_trait]
impl Repository<Contact> for PgContactRepository {
    async fn get_all(&self) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            "SELECT contact_id, contact_name, company_id, country_id
             FROM contacts ORDER BY contact_id",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut contacts = Vec::with_capacity(rows.len());
        for row in &rows {
            contacts.push(contact_from_row(row)?);
        }
        Ok(contacts)
    }

    async fn get(&self, id: i32) -> Result<Contact> {
        let row = sqlx::query(
            "SELECT contact_id, contact_name, company_id, country_id
             FROM contacts WHERE contact_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(contact_from_row(&row)?),
            None => Err(Error::not_found(Contact::NAME, id)),
        }
    }

    async fn save(&self, contact: Contact) -> Result<i32> {
        let mut tx = self.pool.begin().await?;
        if !exists(&mut *tx, COMPANY_EXISTS, contact.company_id).await? {
            return Err(Error::not_found(Company::NAME, contact.company_id));
        }
        if !exists(&mut *tx, COUNTRY_EXISTS, contact.country_id).await? {
            return Err(Error::not_found(Country::NAME, contact.country_id));
        }
        let id = if contact.contact_id > 0 {
            if !exists(&mut *tx, CONTACT_EXISTS, contact.contact_id).await? {
                return Err(Error::not_found(Contact::NAME, contact.contact_id));
            }
            sqlx::query(
                "UPDATE contacts
                 SET contact_name = $2, company_id = $3, country_id = $4
                 WHERE contact_id = $1",
            )
            .bind(contact.contact_id)
            .bind(&contact.contact_name)
            .bind(contact.company_id)
            .bind(contact.country_id)
            .execute(&mut *tx)
            .await?;
            contact.contact_id
        } else {
            let row = sqlx::query(
                "INSERT INTO contacts (contact_name, company_id, country_id)
                 VALUES ($1, $2, $3) RETURNING contact_id",
            )
            .bind(&contact.contact_name)
            .bind(contact.company_id)
            .bind(contact.country_id)
            .fetch_one(&mut *tx)
            .await?;
            row.try_get("contact_id")?
        };
        tx.commit().await?;
        Ok(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE contact_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found(Contact::NAME, id));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn get_all_with_company_and_country(&self) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            "SELECT c.contact_id, c.contact_name, c.company_id, c.country_id,
                    comp.company_name, cou.country_name
             FROM contacts c
             JOIN companies comp ON comp.company_id = c.company_id
             JOIN countries cou ON cou.country_id = c.country_id
             ORDER BY c.contact_id",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut contacts = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut contact = contact_from_row(row)?;
            contact.company = Some(Company {
                company_id: contact.company_id,
                company_name: row.try_get("company_name")?,
            });
            contact.country = Some(Country {
                country_id: contact.country_id,
                country_name: row.try_get("country_name")?,
            });
            contacts.push(contact);
        }
        Ok(contacts)
    }

    async fn filter(
        &self,
        company_id: Option<i32>,
        country_id: Option<i32>,
    ) -> Result<Vec<Contact>> {
        if let Some(id) = company_id {
            if !exists(&self.pool, COMPANY_EXISTS, id).await? {
                return Err(Error::not_found(Company::NAME, id));
            }
        }
        if let Some(id) = country_id {
            if !exists(&self.pool, COUNTRY_EXISTS, id).await? {
                return Err(Error::not_found(Country::NAME, id));
            }
        }
        let rows = sqlx::query(
            "SELECT contact_id, contact_name, company_id, country_id
             FROM contacts
             WHERE ($1::int4 IS NULL OR company_id = $1)
               AND ($2::int4 IS NULL OR country_id = $2)
             ORDER BY contact_id",
        )
        .bind(company_id)
        .bind(country_id)
        .fetch_all(&self.pool)
        .await?;
        let mut contacts = Vec::with_capacity(rows.len());
        for row in &rows {
            contacts.push(contact_from_row(row)?);
        }
        Ok(contacts)
    }
}

pub struct PgCountryRepository {
    pool: PgPool,
}

#[async_trait]
impl Repository<Country> for PgCountryRepository {
    async fn get_all(&self) -> Result<Vec<Country>> {
        let rows = sqlx::query(
            "SELECT country_id, country_name FROM countries ORDER BY country_id",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut countries = Vec::with_capacity(rows.len());
        for row in &rows {
            countries.push(country_from_row(row)?);
        }
        Ok(countries)
    }

    async fn get(&self, id: i32) -> Result<Country> {
        let row = sqlx::query(
            "SELECT country_id, country_name FROM countries WHERE country_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(country_from_row(&row)?),
            None => Err(Error::not_found(Country::NAME, id)),
        }
    }

    async fn save(&self, country: Country) -> Result<i32> {
        let mut tx = self.pool.begin().await?;
        let id = if country.country_id > 0 {
            if !exists(&mut *tx, COUNTRY_EXISTS, country.country_id).await? {
                return Err(Error::not_found(Country::NAME, country.country_id));
            }
            sqlx::query("UPDATE countries SET country_name = $2 WHERE country_id = $1")
                .bind(country.country_id)
                .bind(&country.country_name)
                .execute(&mut *tx)
                .await?;
            country.country_id
        } else {
            let row = sqlx::query(
                "INSERT INTO countries (country_name) VALUES ($1) RETURNING country_id",
            )
            .bind(&country.country_name)
            .fetch_one(&mut *tx)
            .await?;
            row.try_get("country_id")?
        };
        tx.commit().await?;
        Ok(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM countries WHERE country_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found(Country::NAME, id));
        }
        Ok(())
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn company_statistics(&self, country_id: i32) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query(
            "SELECT comp.company_name AS company_name, COUNT(*) AS contact_count
             FROM contacts c
             JOIN companies comp ON comp.company_id = c.company_id
             WHERE c.country_id = $1
             GROUP BY comp.company_name",
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await?;
        let mut stats = HashMap::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.try_get("company_name")?;
            let count: i64 = row.try_get("contact_count")?;
            stats.insert(name, count);
        }
        Ok(stats)
    }
}

//! Per-entity field validation.
//!
//! Rejects malformed entities before they reach persistence. These checks
//! are purely field-level; foreign-key existence is enforced by the
//! storage layer at save time.

use crate::domain::entity::{Company, Contact, Country};
use crate::domain::error::{Error, FieldFailure, Result};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;

fn check_name(field: &'static str, label: &str, value: &str, failures: &mut Vec<FieldFailure>) {
    if value.is_empty() {
        failures.push(FieldFailure {
            field,
            message: format!("{} is required.", label),
        });
        return;
    }
    let len = value.chars().count();
    if len < NAME_MIN || len > NAME_MAX {
        failures.push(FieldFailure {
            field,
            message: format!("{} must be between {} and {} characters.", label, NAME_MIN, NAME_MAX),
        });
    }
}

pub fn validate_company(company: &Company) -> Result<()> {
    let mut failures = Vec::new();
    check_name("companyName", "Company name", &company.company_name, &mut failures);
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(failures))
    }
}

pub fn validate_country(country: &Country) -> Result<()> {
    let mut failures = Vec::new();
    check_name("countryName", "Country name", &country.country_name, &mut failures);
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(failures))
    }
}

pub fn validate_contact(contact: &Contact) -> Result<()> {
    let mut failures = Vec::new();
    check_name("contactName", "Contact name", &contact.contact_name, &mut failures);
    if contact.company_id == 0 {
        failures.push(FieldFailure {
            field: "companyId",
            message: "CompanyId cannot be empty".to_string(),
        });
    }
    if contact.country_id == 0 {
        failures.push(FieldFailure {
            field: "countryId",
            message: "CountryId cannot be empty".to_string(),
        });
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(failures))
    }
}

/// Page parameters must both be >= 1; never silently clamped.
pub fn validate_page_params(page_number: i64, page_size: i64) -> Result<()> {
    let mut failures = Vec::new();
    if page_number < 1 {
        failures.push(FieldFailure {
            field: "pageNumber",
            message: "pageNumber must be greater than or equal to 1.".to_string(),
        });
    }
    if page_size < 1 {
        failures.push(FieldFailure {
            field: "pageSize",
            message: "pageSize must be greater than or equal to 1.".to_string(),
        });
    }
    // Both >= 1 here; reject windows whose offset cannot be represented.
    if failures.is_empty() && (page_number - 1).checked_mul(page_size).is_none() {
        failures.push(FieldFailure {
            field: "pageNumber",
            message: "pageNumber and pageSize describe a page outside the addressable range."
                .to_string(),
        });
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(failures))
    }
}

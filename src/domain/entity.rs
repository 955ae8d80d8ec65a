//! Persisted entities and their relationships.
//!
//! Wire names are camelCase (`companyId`, `contactName`, ...) to stay
//! compatible with existing API consumers. An id `<= 0` marks an entity
//! that has not been persisted yet; `save` assigns the real id.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Server-assigned primary identifier. `<= 0` means "not yet persisted".
    #[serde(default)]
    pub company_id: i32,
    /// Defaults to empty when omitted so a missing name fails validation
    /// the same way an empty one does.
    #[serde(default)]
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default)]
    pub country_id: i32,
    #[serde(default)]
    pub country_name: String,
}

/// A contact belongs to exactly one company and one country. Both foreign
/// keys must reference existing rows at save time; deleting either parent
/// cascades to the contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub contact_id: i32,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub company_id: i32,
    #[serde(default)]
    pub country_id: i32,
    /// Populated only by the eager-join read path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

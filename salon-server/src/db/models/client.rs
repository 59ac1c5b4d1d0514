use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Salon client record, scoped to one organization.
///
/// `number_of_visits` starts at 1 on first save and is incremented by the
/// repository on every subsequent save of the same phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub organization_id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(default)]
    pub number_of_visits: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_visit_rating: Option<u8>,
    #[serde(deserialize_with = "serde_helpers::bool_false", default)]
    pub agree_to_terms: bool,
    pub created_at: String,
}

impl Client {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Check-in form payload; matched to an existing client by phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSave {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_visit_rating: Option<u8>,
    #[serde(deserialize_with = "serde_helpers::bool_false", default)]
    pub agree_to_terms: bool,
}

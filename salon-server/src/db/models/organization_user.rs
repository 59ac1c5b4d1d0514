use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::Role;

use super::serde_helpers;

/// Role mapping between a user and an organization.
///
/// Invariant: a mapping row exists only while its role set is non-empty.
/// Updating roles to `[]` deletes the row instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationUser {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub organization_id: RecordId,
    pub roles: Vec<Role>,
    pub created_at: String,
}

/// Mapping joined with user identity fields, for the staff listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMember {
    #[serde(with = "serde_helpers::record_id")]
    pub user_id: RecordId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<Role>,
}

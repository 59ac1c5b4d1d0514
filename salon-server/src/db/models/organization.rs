use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::Role;

use super::serde_helpers;

/// Denormalized owner mirror kept on the organization document.
///
/// Written by the owner-assignment operation alongside the role mapping; the
/// two writes are independent and not transactional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub email: String,
    #[serde(with = "serde_helpers::record_id")]
    pub uid: RecordId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id",
        default
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub owner: Option<OwnerRef>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Organization joined with the caller's roles in it, for the
/// "my organizations" listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationWithRoles {
    #[serde(flatten)]
    pub organization: Organization,
    pub roles: Vec<Role>,
}

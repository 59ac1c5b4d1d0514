use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// A single sale rung up by an employee.
///
/// `employee_name` is resolved from the employee's user record at creation
/// and denormalized here so sales listings and the end-of-day summary never
/// need a join. `paid` defaults to false; settlement happens at the cashier
/// desk later in the day. `combo_num` groups sales paid together with one
/// payment; 0 means not part of a combo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub organization_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub employee_id: RecordId,
    pub employee_name: String,
    pub amount: f64,
    #[serde(default)]
    pub combo_num: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
    #[serde(deserialize_with = "serde_helpers::bool_false", default)]
    pub paid: bool,
    /// Day key, `YYYY-MM-DD`
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreate {
    pub amount: f64,
    #[serde(default)]
    pub combo_num: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo_num: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}

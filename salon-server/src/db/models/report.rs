use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Per-employee slice of a day's sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub employee_name: String,
    pub total: f64,
    pub sale_count: u32,
}

/// End-of-day cash reconciliation report, one per organization per day.
///
/// Saving a report for a day that already has one overwrites it; the last
/// submission before close wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndOfDayReport {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub organization_id: RecordId,
    /// Day key, `YYYY-MM-DD`
    pub date: String,
    pub total_sale: f64,
    pub cash: f64,
    pub debit: f64,
    #[serde(default)]
    pub service_discount: f64,
    #[serde(default)]
    pub giftcard_buy: f64,
    #[serde(default)]
    pub giftcard_redeem: f64,
    #[serde(default)]
    pub expense: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expense_note: Option<String>,
    #[serde(default)]
    pub other_income: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub income_note: Option<String>,
    /// Reconciliation result as computed at submit time
    pub result: f64,
    pub verdict: String,
    #[serde(default)]
    pub employee_summaries: Vec<EmployeeSummary>,
    pub submitted_by: String,
    pub created_at: String,
}

/// Cashier's submission payload. Sale totals and the verdict are computed
/// server-side from the day's paid sales, never trusted from the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndOfDayReportSubmit {
    pub date: String,
    pub cash: f64,
    pub debit: f64,
    #[serde(default)]
    pub service_discount: f64,
    #[serde(default)]
    pub giftcard_buy: f64,
    #[serde(default)]
    pub giftcard_redeem: f64,
    #[serde(default)]
    pub expense: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expense_note: Option<String>,
    #[serde(default)]
    pub other_income: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub income_note: Option<String>,
}

impl EndOfDayReportSubmit {
    /// Notes are mandatory for the amounts they explain.
    pub fn validate_notes(&self) -> Result<(), &'static str> {
        if self.other_income != 0.0
            && self.income_note.as_deref().unwrap_or("").trim().is_empty()
        {
            return Err("Income note is required when other income is set");
        }
        if self.expense != 0.0 && self.expense_note.as_deref().unwrap_or("").trim().is_empty() {
            return Err("Expense note is required when expense is set");
        }
        Ok(())
    }
}

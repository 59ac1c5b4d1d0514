//! Cash reconciliation
//!
//! The end-of-day precheck compares what the drawer and terminal hold
//! against what the day's paid sales say they should hold. Card amounts
//! (debit, gift card purchases and redemptions) arrive tax-included and are
//! divided back to pre-tax before comparison.

use serde::{Deserialize, Serialize};

use crate::db::models::{EmployeeSummary, Sale};

/// Card totals include 13% sales tax.
pub const CARD_TAX_DIVISOR: f64 = 1.13;

/// A surplus beyond this is suspicious enough to recount.
pub const OVER_THRESHOLD: f64 = 40.0;

/// Counted and adjustment figures entered by the cashier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreCheckInput {
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
    #[serde(default)]
    pub other_income: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreCheckOutcome {
    /// Counted minus expected; negative means money is missing
    pub result: f64,
    pub verdict: String,
}

/// Counted minus expected.
///
/// Expected takings are the day's sales, less discounts given, plus gift
/// cards sold (pre-tax), minus gift cards redeemed (pre-tax, no new money),
/// minus cash taken for expenses, plus other income.
pub fn reconcile(input: &PreCheckInput) -> f64 {
    let counted = input.cash + input.debit / CARD_TAX_DIVISOR;
    let expected = input.total_sale - input.service_discount
        + input.giftcard_buy / CARD_TAX_DIVISOR
        - input.giftcard_redeem / CARD_TAX_DIVISOR
        - input.expense
        + input.other_income;
    counted - expected
}

pub fn verdict(result: f64) -> String {
    if result > OVER_THRESHOLD {
        "Double check over!".to_string()
    } else if result < 0.0 {
        format!("Miss ${:.2}", -result)
    } else {
        "OK".to_string()
    }
}

pub fn precheck(input: &PreCheckInput) -> PreCheckOutcome {
    let result = reconcile(input);
    PreCheckOutcome {
        result,
        verdict: verdict(result),
    }
}

/// Total the day's sales and group them per employee, preserving first-seen
/// employee order.
pub fn summarize_sales(sales: &[Sale]) -> (f64, Vec<EmployeeSummary>) {
    let mut total = 0.0;
    let mut summaries: Vec<EmployeeSummary> = Vec::new();

    for sale in sales {
        total += sale.amount;
        match summaries
            .iter_mut()
            .find(|s| s.employee_name == sale.employee_name)
        {
            Some(summary) => {
                summary.total += sale.amount;
                summary.sale_count += 1;
            }
            None => summaries.push(EmployeeSummary {
                employee_name: sale.employee_name.clone(),
                total: sale.amount,
                sale_count: 1,
            }),
        }
    }

    (total, summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(employee: &str, amount: f64) -> Sale {
        Sale {
            id: None,
            organization_id: "organization:o1".parse().unwrap(),
            employee_id: "user:u1".parse().unwrap(),
            employee_name: employee.to_string(),
            amount,
            combo_num: 0,
            note: None,
            paid: true,
            date: "2026-03-01".to_string(),
            created_at: "2026-03-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_balanced_day_is_ok() {
        let input = PreCheckInput {
            total_sale: 500.0,
            cash: 400.0,
            debit: 113.0,
            ..Default::default()
        };
        let outcome = precheck(&input);
        assert!(outcome.result.abs() < 1e-9);
        assert_eq!(outcome.verdict, "OK");
    }

    #[test]
    fn test_shortage_reports_missing_amount() {
        let input = PreCheckInput {
            total_sale: 500.0,
            cash: 300.0,
            debit: 113.0,
            ..Default::default()
        };
        let outcome = precheck(&input);
        assert_eq!(outcome.verdict, "Miss $100.00");
    }

    #[test]
    fn test_large_surplus_demands_recount() {
        let input = PreCheckInput {
            total_sale: 100.0,
            cash: 500.0,
            ..Default::default()
        };
        let outcome = precheck(&input);
        assert_eq!(outcome.verdict, "Double check over!");
    }

    #[test]
    fn test_small_surplus_is_ok() {
        let input = PreCheckInput {
            total_sale: 100.0,
            cash: 120.0,
            ..Default::default()
        };
        assert_eq!(precheck(&input).verdict, "OK");
    }

    #[test]
    fn test_adjustments_shift_expected() {
        // Discounts and expenses lower expected takings; gift card sales
        // raise them net of tax.
        let input = PreCheckInput {
            total_sale: 500.0,
            cash: 400.0,
            debit: 113.0,
            service_discount: 50.0,
            expense: 30.0,
            giftcard_buy: 113.0,
            ..Default::default()
        };
        // expected = 500 - 50 + 100 - 30 = 520; counted = 500
        let result = reconcile(&input);
        assert!((result - -20.0).abs() < 1e-9);
        assert_eq!(verdict(result), "Miss $20.00");
    }

    #[test]
    fn test_summary_groups_by_employee_in_first_seen_order() {
        let sales = vec![
            sale("Jane", 45.0),
            sale("Mei", 60.0),
            sale("Jane", 30.0),
        ];
        let (total, summaries) = summarize_sales(&sales);
        assert_eq!(total, 135.0);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].employee_name, "Jane");
        assert_eq!(summaries[0].total, 75.0);
        assert_eq!(summaries[0].sale_count, 2);
        assert_eq!(summaries[1].employee_name, "Mei");
    }

    #[test]
    fn test_empty_day_summarizes_to_zero() {
        let (total, summaries) = summarize_sales(&[]);
        assert_eq!(total, 0.0);
        assert!(summaries.is_empty());
    }
}

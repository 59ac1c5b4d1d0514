//! End-Of-Day Report API Handlers
//!
//! Sale totals are always recomputed server-side from the day's paid sales;
//! the cashier only supplies counted money and adjustment figures.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::OrgContext;
use crate::auth::policy::{CASHIER_DESK, OWNER_ONLY};
use crate::core::ServerState;
use crate::db::models::{EmployeeSummary, EndOfDayReport, EndOfDayReportSubmit};
use crate::db::repository::{RepoError, ReportRepository, SaleRepository};
use crate::reconciliation::{PreCheckInput, precheck as run_precheck, summarize_sales};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct PrecheckResponse {
    pub total_sale: f64,
    pub result: f64,
    pub verdict: String,
    pub employee_summaries: Vec<EmployeeSummary>,
}

async fn reconcile_day(
    state: &ServerState,
    ctx: &OrgContext,
    submit: &EndOfDayReportSubmit,
) -> AppResult<(f64, f64, String, Vec<EmployeeSummary>)> {
    let sales = SaleRepository::new(state.get_db())
        .find_by_date(&ctx.organization_id(), &submit.date, Some(true), None)
        .await?;
    let (total_sale, summaries) = summarize_sales(&sales);

    let outcome = run_precheck(&PreCheckInput {
        total_sale,
        cash: submit.cash,
        debit: submit.debit,
        service_discount: submit.service_discount,
        giftcard_buy: submit.giftcard_buy,
        giftcard_redeem: submit.giftcard_redeem,
        expense: submit.expense,
        other_income: submit.other_income,
    });

    Ok((total_sale, outcome.result, outcome.verdict, summaries))
}

/// Dry-run reconciliation before submitting.
pub async fn precheck(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Json(payload): Json<EndOfDayReportSubmit>,
) -> AppResult<Json<PrecheckResponse>> {
    ctx.authorize(&CASHIER_DESK)?;
    let (total_sale, result, verdict, employee_summaries) =
        reconcile_day(&state, &ctx, &payload).await?;
    Ok(Json(PrecheckResponse {
        total_sale,
        result,
        verdict,
        employee_summaries,
    }))
}

/// Submit the day's report. A second submission for the same day replaces
/// the first.
pub async fn submit(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Json(payload): Json<EndOfDayReportSubmit>,
) -> AppResult<Json<EndOfDayReport>> {
    ctx.authorize(&CASHIER_DESK)?;
    payload.validate_notes().map_err(AppError::validation)?;
    if payload.date.trim().is_empty() {
        return Err(AppError::validation("Date is required"));
    }

    let (total_sale, result, verdict, employee_summaries) =
        reconcile_day(&state, &ctx, &payload).await?;

    let organization_id = ctx
        .organization_id()
        .parse()
        .map_err(|_| AppError::internal("Organization id failed to parse"))?;
    let report = EndOfDayReport {
        id: None,
        organization_id,
        date: payload.date,
        total_sale,
        cash: payload.cash,
        debit: payload.debit,
        service_discount: payload.service_discount,
        giftcard_buy: payload.giftcard_buy,
        giftcard_redeem: payload.giftcard_redeem,
        expense: payload.expense,
        expense_note: payload.expense_note,
        other_income: payload.other_income,
        income_note: payload.income_note,
        result,
        verdict,
        employee_summaries,
        submitted_by: ctx.user.email.clone(),
        created_at: Utc::now().to_rfc3339(),
    };

    let saved = ReportRepository::new(state.get_db()).save(report).await?;
    Ok(Json(saved))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Report history, newest first.
pub async fn list(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Query(query): Query<ReportRangeQuery>,
) -> AppResult<Json<Vec<EndOfDayReport>>> {
    ctx.authorize(&OWNER_ONLY)?;
    let repo = ReportRepository::new(state.get_db());
    let reports = repo
        .find_all(
            &ctx.organization_id(),
            query.from.as_deref(),
            query.to.as_deref(),
        )
        .await?;
    Ok(Json(reports))
}

pub async fn get_by_date(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Path((_org_id, date)): Path<(String, String)>,
) -> AppResult<Json<EndOfDayReport>> {
    ctx.authorize(&CASHIER_DESK)?;
    let repo = ReportRepository::new(state.get_db());
    let report = repo
        .find_by_date(&ctx.organization_id(), &date)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("No report for {}", date)))?;
    Ok(Json(report))
}

//! Sales API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::OrgContext;
use crate::auth::policy::{CASHIER_DESK, SALES_VIEWERS, STAFF};
use crate::core::ServerState;
use crate::db::models::{Sale, SaleCreate, SaleUpdate};
use crate::db::repository::SaleRepository;
use crate::utils::{AppError, AppResult};

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    /// Day key, defaults to today
    pub date: Option<String>,
    pub paid: Option<bool>,
}

/// Record a sale for the calling employee.
pub async fn create(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Json(payload): Json<SaleCreate>,
) -> AppResult<Json<Sale>> {
    ctx.authorize(&STAFF)?;
    let repo = SaleRepository::new(state.get_db());
    Ok(Json(
        repo.create(&ctx.organization_id(), &ctx.user.id, payload)
            .await?,
    ))
}

/// A day's sales across all employees.
pub async fn list(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    ctx.authorize(&SALES_VIEWERS)?;
    let date = query.date.unwrap_or_else(today);
    let repo = SaleRepository::new(state.get_db());
    Ok(Json(
        repo.find_by_date(&ctx.organization_id(), &date, query.paid, None)
            .await?,
    ))
}

/// The calling employee's own sales for the day.
pub async fn list_mine(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    ctx.authorize(&STAFF)?;
    let date = query.date.unwrap_or_else(today);
    let repo = SaleRepository::new(state.get_db());
    Ok(Json(
        repo.find_by_date(
            &ctx.organization_id(),
            &date,
            query.paid,
            Some(&ctx.user.id),
        )
        .await?,
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Path((_org_id, sale_id)): Path<(String, String)>,
    Json(payload): Json<SaleUpdate>,
) -> AppResult<Json<Sale>> {
    ctx.authorize(&CASHIER_DESK)?;
    let repo = SaleRepository::new(state.get_db());
    repo.find_by_id(&sale_id)
        .await?
        .filter(|s| s.organization_id.to_string() == ctx.organization_id())
        .ok_or_else(|| AppError::not_found(format!("Sale {} not found", sale_id)))?;
    Ok(Json(repo.update(&sale_id, payload).await?))
}

#[derive(Debug, Deserialize)]
pub struct PayComboRequest {
    /// Day key, defaults to today
    pub date: Option<String>,
    pub combo_num: u32,
}

/// Settle a combo: one payment covering every sale with the combo number
/// that day.
pub async fn pay_combo(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Json(payload): Json<PayComboRequest>,
) -> AppResult<Json<Vec<Sale>>> {
    ctx.authorize(&CASHIER_DESK)?;
    let date = payload.date.unwrap_or_else(today);
    let repo = SaleRepository::new(state.get_db());
    let settled = repo
        .settle_combo(&ctx.organization_id(), &date, payload.combo_num)
        .await?;
    if settled.is_empty() {
        return Err(AppError::not_found(format!(
            "No sales in combo {} on {}",
            payload.combo_num, date
        )));
    }
    Ok(Json(settled))
}

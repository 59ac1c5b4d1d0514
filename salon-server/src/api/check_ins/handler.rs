//! Check-In API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::OrgContext;
use crate::auth::policy::{MANAGEMENT, STAFF};
use crate::core::ServerState;
use crate::db::models::{CheckIn, CheckInCreate};
use crate::db::repository::CheckInRepository;
use crate::utils::{AppError, AppResult};

/// Queue a client for service.
pub async fn create(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Json(payload): Json<CheckInCreate>,
) -> AppResult<Json<CheckIn>> {
    ctx.require_member()?;
    let repo = CheckInRepository::new(state.get_db());
    Ok(Json(repo.create(&ctx.organization_id(), payload).await?))
}

/// Today's queue, waiting entries first.
pub async fn today(
    State(state): State<ServerState>,
    ctx: OrgContext,
) -> AppResult<Json<Vec<CheckIn>>> {
    ctx.authorize(&STAFF)?;
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let repo = CheckInRepository::new(state.get_db());
    Ok(Json(repo.find_by_date(&ctx.organization_id(), &date).await?))
}

#[derive(Debug, Deserialize)]
pub struct SetServiceRequest {
    pub in_service: bool,
}

/// Move a queue entry into or out of service.
pub async fn set_service(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Path((_org_id, check_in_id)): Path<(String, String)>,
    Json(payload): Json<SetServiceRequest>,
) -> AppResult<Json<CheckIn>> {
    ctx.authorize(&MANAGEMENT)?;
    let repo = CheckInRepository::new(state.get_db());
    repo.find_by_id(&check_in_id)
        .await?
        .filter(|c| c.organization_id.to_string() == ctx.organization_id())
        .ok_or_else(|| AppError::not_found(format!("Check-in {} not found", check_in_id)))?;
    let updated = repo.set_in_service(&check_in_id, payload.in_service).await?;
    Ok(Json(updated))
}

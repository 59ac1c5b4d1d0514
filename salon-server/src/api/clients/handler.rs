//! Client API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::OrgContext;
use crate::auth::policy::STAFF;
use crate::core::ServerState;
use crate::db::models::{Client, ClientSave};
use crate::db::repository::ClientRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    pub phone: String,
}

/// Look up a returning client by phone for the check-in form.
pub async fn lookup_by_phone(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Query(query): Query<PhoneQuery>,
) -> AppResult<Json<Option<Client>>> {
    ctx.authorize(&STAFF)?;
    let repo = ClientRepository::new(state.get_db());
    Ok(Json(
        repo.find_by_phone(&ctx.organization_id(), &query.phone)
            .await?,
    ))
}

/// Save the check-in form: creates the client on first visit, otherwise
/// updates the record and bumps the visit counter.
pub async fn save(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Json(payload): Json<ClientSave>,
) -> AppResult<Json<Client>> {
    ctx.require_member()?;
    let repo = ClientRepository::new(state.get_db());
    Ok(Json(repo.save(&ctx.organization_id(), payload).await?))
}

pub async fn get_one(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Path((_org_id, client_id)): Path<(String, String)>,
) -> AppResult<Json<Client>> {
    ctx.authorize(&STAFF)?;
    let repo = ClientRepository::new(state.get_db());
    let client = repo
        .find_by_id(&client_id)
        .await?
        .filter(|c| c.organization_id.to_string() == ctx.organization_id())
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", client_id)))?;
    Ok(Json(client))
}

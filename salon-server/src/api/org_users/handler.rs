//! Staff Management API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::Role;

use crate::auth::OrgContext;
use crate::auth::policy::OWNER_ONLY;
use crate::core::ServerState;
use crate::db::models::{OrganizationMember, OrganizationUser};
use crate::db::repository::OrganizationUserRepository;
use crate::security_log;
use crate::utils::AppResult;

pub async fn list(
    State(state): State<ServerState>,
    ctx: OrgContext,
) -> AppResult<Json<Vec<OrganizationMember>>> {
    ctx.authorize(&OWNER_ONLY)?;
    let repo = OrganizationUserRepository::new(state.get_db());
    Ok(Json(repo.members(&ctx.organization_id()).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub email: String,
}

/// Add an existing account to the staff, defaulting to the employee role.
pub async fn add(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Json(payload): Json<AddMemberRequest>,
) -> AppResult<Json<OrganizationUser>> {
    ctx.authorize(&OWNER_ONLY)?;
    let repo = OrganizationUserRepository::new(state.get_db());
    let mapping = repo.add_user(&ctx.organization_id(), &payload.email).await?;
    security_log!(
        "INFO",
        "member_added",
        by = ctx.user.email,
        organization_id = ctx.organization_id(),
        email = payload.email
    );
    Ok(Json(mapping))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRolesRequest {
    pub roles: Vec<Role>,
}

/// Replace a member's role set. An empty set removes the member.
pub async fn update_roles(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Path((_org_id, user_id)): Path<(String, String)>,
    Json(payload): Json<UpdateRolesRequest>,
) -> AppResult<Json<Option<OrganizationUser>>> {
    ctx.authorize(&OWNER_ONLY)?;
    let repo = OrganizationUserRepository::new(state.get_db());
    let mapping = repo
        .update_roles(&ctx.organization_id(), &user_id, payload.roles)
        .await?;
    security_log!(
        "INFO",
        "roles_updated",
        by = ctx.user.email,
        organization_id = ctx.organization_id(),
        user_id = user_id
    );
    Ok(Json(mapping))
}

pub async fn remove(
    State(state): State<ServerState>,
    ctx: OrgContext,
    Path((_org_id, user_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    ctx.authorize(&OWNER_ONLY)?;
    let repo = OrganizationUserRepository::new(state.get_db());
    let removed = repo.remove_user(&ctx.organization_id(), &user_id).await?;
    security_log!(
        "INFO",
        "member_removed",
        by = ctx.user.email,
        organization_id = ctx.organization_id(),
        user_id = user_id
    );
    Ok(Json(removed))
}

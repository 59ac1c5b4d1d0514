//! Organization API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::Role;

use crate::auth::{AdminUser, CurrentUser, OrgContext};
use crate::core::ServerState;
use crate::db::models::{
    Organization, OrganizationCreate, OrganizationUpdate, OrganizationUser, OrganizationWithRoles,
};
use crate::db::repository::{OrganizationRepository, OrganizationUserRepository, UserRepository};
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// List every organization (admin app).
pub async fn list_all(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Organization>>> {
    let repo = OrganizationRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    admin: AdminUser,
    Json(payload): Json<OrganizationCreate>,
) -> AppResult<Json<Organization>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Organization name is required"));
    }
    let repo = OrganizationRepository::new(state.get_db());
    let org = repo.create(payload).await?;
    security_log!(
        "INFO",
        "organization_created",
        admin = admin.0.email,
        organization_id = org.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    );
    Ok(Json(org))
}

pub async fn update(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(org_id): Path<String>,
    Json(payload): Json<OrganizationUpdate>,
) -> AppResult<Json<Organization>> {
    let repo = OrganizationRepository::new(state.get_db());
    Ok(Json(repo.update(&org_id, payload).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(org_id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrganizationRepository::new(state.get_db());
    let deleted = repo.delete(&org_id).await?;
    security_log!(
        "WARN",
        "organization_deleted",
        admin = admin.0.email,
        organization_id = org_id
    );
    Ok(Json(deleted))
}

#[derive(Debug, Deserialize)]
pub struct AssignOwnerRequest {
    pub email: String,
}

/// Grant the owner role by e-mail and mirror it onto the organization.
pub async fn assign_owner(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(org_id): Path<String>,
    Json(payload): Json<AssignOwnerRequest>,
) -> AppResult<Json<OrganizationUser>> {
    let users = UserRepository::new(state.get_db());
    let user = users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No account for '{}'", payload.email)))?;

    let repo = OrganizationUserRepository::new(state.get_db());
    let mapping = repo.assign_owner(&org_id, &user).await?;
    security_log!(
        "INFO",
        "owner_assigned",
        admin = admin.0.email,
        organization_id = org_id,
        owner = user.email
    );
    Ok(Json(mapping))
}

/// Revoke the owner role. The mapping disappears when no roles remain.
pub async fn remove_owner(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path((org_id, user_id)): Path<(String, String)>,
) -> AppResult<Json<Option<OrganizationUser>>> {
    let repo = OrganizationUserRepository::new(state.get_db());
    let remaining = repo.remove_owner(&org_id, &user_id).await?;
    security_log!(
        "INFO",
        "owner_removed",
        admin = admin.0.email,
        organization_id = org_id,
        user_id = user_id
    );
    Ok(Json(remaining))
}

/// Organizations the caller belongs to, for the selection screen.
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OrganizationWithRoles>>> {
    let repo = OrganizationUserRepository::new(state.get_db());
    Ok(Json(repo.find_organizations_by_user(&user.id).await?))
}

/// The organization document, for members only.
pub async fn get_one(ctx: OrgContext) -> AppResult<Json<Organization>> {
    ctx.require_member()?;
    Ok(Json(ctx.organization))
}

/// The caller's role set in this organization; empty for non-members.
pub async fn my_roles(ctx: OrgContext) -> Json<Vec<Role>> {
    Json(ctx.roles)
}

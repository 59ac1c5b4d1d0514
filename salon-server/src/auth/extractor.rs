//! Request extractors
//!
//! - [`CurrentUser`]: validates the JWT when the middleware has not already
//!   done so.
//! - [`AdminUser`]: session present on the configured admin e-mail allowlist.
//! - [`OrgContext`]: the organization context resolver — current
//!   organization from the URL plus the caller's role set within it.

use std::collections::HashMap;

use axum::extract::Path;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::policy::AccessPolicy;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::models::Organization;
use crate::db::repository::{OrganizationRepository, OrganizationUserRepository};
use crate::security_log;
use crate::utils::AppError;
use shared::Role;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        let jwt_service = state.get_jwt_service();
        match jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );

                match e {
                    crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

/// Session on the admin e-mail allowlist
///
/// Guards the admin app's organization management endpoints.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<ServerState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if !state.is_admin(&user) {
            security_log!(
                "WARN",
                "admin_required",
                user_id = user.id.clone(),
                email = user.email.clone()
            );
            return Err(AppError::forbidden("Admin access required"));
        }

        Ok(AdminUser(user))
    }
}

/// Resolved organization context for `/api/organizations/{org_id}/...` routes
///
/// Resolution order matters: the session is checked before any role lookup,
/// so an unauthenticated request never reaches the database.
#[derive(Debug, Clone)]
pub struct OrgContext {
    pub user: CurrentUser,
    pub organization: Organization,
    /// Roles the caller holds within this organization (possibly empty)
    pub roles: Vec<Role>,
}

impl OrgContext {
    /// Record id of the current organization ("organization:xyz")
    pub fn organization_id(&self) -> String {
        self.organization
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Evaluate an access policy against this context
    pub fn authorize(&self, policy: &AccessPolicy) -> Result<(), AppError> {
        policy.authorize(Some(&self.user), &self.roles)
    }

    /// Require any role mapping at all, whatever the roles are
    pub fn require_member(&self) -> Result<(), AppError> {
        if self.roles.is_empty() {
            return Err(AppError::forbidden(
                "Not a member of this organization",
            ));
        }
        Ok(())
    }
}

impl FromRequestParts<ServerState> for OrgContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Session first - 401 before anything touches the database
        let user = CurrentUser::from_request_parts(parts, state).await?;

        // 2. Organization id from the path
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Missing path parameters"))?;
        let org_id = params
            .get("org_id")
            .cloned()
            .ok_or_else(|| AppError::validation("Missing organization id"))?;

        // 3. Organization document - 404 stands in for "redirect to selection"
        let org_repo = OrganizationRepository::new(state.get_db());
        let organization = org_repo
            .find_by_id(&org_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Organization {} not found", org_id)))?;

        // 4. Caller's roles; lookup failures deny access rather than erroring
        let ou_repo = OrganizationUserRepository::new(state.get_db());
        let roles = match ou_repo.find_roles(&user.id, &org_id).await {
            Ok(roles) => roles,
            Err(e) => {
                security_log!(
                    "WARN",
                    "role_lookup_failed",
                    user_id = user.id.clone(),
                    organization_id = org_id.clone(),
                    error = format!("{}", e)
                );
                Vec::new()
            }
        };

        Ok(OrgContext {
            user,
            organization,
            roles,
        })
    }
}

//! Access policy
//!
//! One configurable policy object shared by every route. A policy states
//! whether a session is required and, optionally, which organization roles
//! may pass.
//!
//! Evaluation order is fixed: authentication first, roles second. An
//! unauthenticated caller is rejected before any role set is consulted.

use shared::Role;

use crate::auth::CurrentUser;
use crate::utils::AppError;

/// Declarative page/endpoint access policy.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    /// Require an authenticated session
    pub require_auth: bool,
    /// Roles that may pass; `None` means any authenticated caller
    pub allowed_roles: Option<&'static [Role]>,
}

impl AccessPolicy {
    /// Any caller, no session required.
    pub const fn public() -> Self {
        Self {
            require_auth: false,
            allowed_roles: None,
        }
    }

    /// Any authenticated caller.
    pub const fn authenticated() -> Self {
        Self {
            require_auth: true,
            allowed_roles: None,
        }
    }

    /// Authenticated caller holding at least one of `allowed`.
    pub const fn roles(allowed: &'static [Role]) -> Self {
        Self {
            require_auth: true,
            allowed_roles: Some(allowed),
        }
    }

    /// Evaluate the policy against a session and the caller's role set
    /// within the current organization.
    pub fn authorize(&self, user: Option<&CurrentUser>, held: &[Role]) -> Result<(), AppError> {
        if self.require_auth && user.is_none() {
            return Err(AppError::unauthorized());
        }

        if let Some(allowed) = self.allowed_roles {
            if !Role::intersects(held, allowed) {
                let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
                return Err(AppError::forbidden(format!(
                    "Requires one of roles: {}",
                    names.join(", ")
                )));
            }
        }

        Ok(())
    }
}

// Role gates, one per page group of the suite.

/// Employee pages (day-to-day salon floor).
pub const STAFF: AccessPolicy =
    AccessPolicy::roles(&[Role::Owner, Role::Manager, Role::Employee]);

/// Cashier desk (sales settlement, end-of-day report).
pub const CASHIER_DESK: AccessPolicy = AccessPolicy::roles(&[Role::Owner, Role::Cashier]);

/// Manager pages (check-in queue management).
pub const MANAGEMENT: AccessPolicy = AccessPolicy::roles(&[Role::Owner, Role::Manager]);

/// Owner-only pages (staff administration).
pub const OWNER_ONLY: AccessPolicy = AccessPolicy::roles(&[Role::Owner]);

/// Sales history viewers.
pub const SALES_VIEWERS: AccessPolicy =
    AccessPolicy::roles(&[Role::Owner, Role::Manager, Role::Cashier]);

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "user:abc".to_string(),
            email: "jane@example.com".to_string(),
            display_name: "Jane Doe".to_string(),
        }
    }

    #[test]
    fn test_unauthenticated_rejected_before_roles() {
        // Even a role set that would pass does not rescue a missing session
        let policy = AccessPolicy::roles(&[Role::Owner]);
        let err = policy.authorize(None, &[Role::Owner]).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_role_mismatch_forbidden() {
        let policy = AccessPolicy::roles(&[Role::Owner, Role::Manager]);
        let u = user();
        let err = policy.authorize(Some(&u), &[Role::Employee]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_role_intersection_grants() {
        let policy = AccessPolicy::roles(&[Role::Owner, Role::Cashier]);
        let u = user();
        assert!(policy
            .authorize(Some(&u), &[Role::Employee, Role::Cashier])
            .is_ok());
    }

    #[test]
    fn test_no_role_constraint_grants_any_session() {
        let policy = AccessPolicy::authenticated();
        let u = user();
        assert!(policy.authorize(Some(&u), &[]).is_ok());
    }

    #[test]
    fn test_public_policy() {
        assert!(AccessPolicy::public().authorize(None, &[]).is_ok());
    }
}

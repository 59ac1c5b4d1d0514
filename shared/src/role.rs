//! Role vocabulary
//!
//! Roles are scoped to an organization: a user holds a (possibly empty) set
//! of roles per organization, stored on the `organization_user` mapping row.
//! The set is closed; unknown role strings are rejected at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A role a user may hold within one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Manager,
    Employee,
    Cashier,
}

/// All assignable roles.
pub const ALL_ROLES: &[Role] = &[Role::Owner, Role::Manager, Role::Employee, Role::Cashier];

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::Cashier => "cashier",
        }
    }

    /// True when `held` contains any of `allowed`.
    pub fn intersects(held: &[Role], allowed: &[Role]) -> bool {
        held.iter().any(|r| allowed.contains(r))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            "cashier" => Ok(Role::Cashier),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in ALL_ROLES {
            let s = role.as_str();
            assert_eq!(s.parse::<Role>().unwrap(), *role);
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Role::Cashier).unwrap();
        assert_eq!(json, "\"cashier\"");
        let role: Role = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role, Role::Owner);
    }

    #[test]
    fn test_intersects() {
        let held = vec![Role::Employee, Role::Cashier];
        assert!(Role::intersects(&held, &[Role::Cashier, Role::Owner]));
        assert!(!Role::intersects(&held, &[Role::Owner, Role::Manager]));
        assert!(!Role::intersects(&[], &[Role::Owner]));
    }
}

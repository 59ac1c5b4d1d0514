//! Authentication and authorization
//!
//! - [`jwt`] - token service and session claims
//! - [`middleware`] - global `require_auth` layer
//! - [`extractor`] - `CurrentUser` / `AdminUser` / `OrgContext` extractors
//! - [`policy`] - the unified access policy object

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod policy;

pub use extractor::{AdminUser, OrgContext};
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use policy::AccessPolicy;

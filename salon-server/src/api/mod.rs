//! API routes
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - register / login / profile
//! - [`organizations`] - organization administration and selection
//! - [`org_users`] - staff and role management within an organization
//! - [`clients`] - client records and check-in form
//! - [`check_ins`] - the day's service queue
//! - [`sales`] - sale entry and settlement
//! - [`reports`] - end-of-day reconciliation reports
//! - [`upload`] - image upload and serving

pub mod auth;
pub mod check_ins;
pub mod clients;
pub mod health;
pub mod org_users;
pub mod organizations;
pub mod reports;
pub mod sales;
pub mod upload;

use axum::Router;

use crate::core::ServerState;

/// Assemble the application router. Global layers (auth middleware, CORS,
/// tracing) are applied by the server on top of this.
pub fn build_app() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(organizations::router())
        .merge(org_users::router())
        .merge(clients::router())
        .merge(check_ins::router())
        .merge(sales::router())
        .merge(reports::router())
        .merge(upload::router())
}

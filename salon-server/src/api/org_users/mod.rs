//! Staff Management API Module
//!
//! Role mappings within an organization. Owner-only.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/organizations/{org_id}/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::add))
        .route("/{user_id}/roles", put(handler::update_roles))
        .route("/{user_id}", axum::routing::delete(handler::remove))
}

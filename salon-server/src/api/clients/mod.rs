//! Client API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/organizations/{org_id}/clients", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::lookup_by_phone).post(handler::save))
        .route("/{client_id}", get(handler::get_one))
}

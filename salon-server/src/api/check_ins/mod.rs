//! Check-In API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/organizations/{org_id}/check-ins", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/today", get(handler::today))
        .route("/{check_in_id}/service", put(handler::set_service))
}

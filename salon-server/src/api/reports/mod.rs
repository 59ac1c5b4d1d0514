//! End-Of-Day Report API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/organizations/{org_id}/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::submit))
        .route("/precheck", post(handler::precheck))
        .route("/{date}", get(handler::get_by_date))
}

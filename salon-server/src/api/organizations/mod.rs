//! Organization API Module
//!
//! Admin-app CRUD plus the selection endpoints every member uses.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/organizations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Admin-only management; the AdminUser extractor gates each handler
        .route("/", get(handler::list_all).post(handler::create))
        .route(
            "/{org_id}",
            get(handler::get_one)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{org_id}/owner", post(handler::assign_owner))
        .route("/{org_id}/owner/{user_id}", delete(handler::remove_owner))
        // Member endpoints
        .route("/mine", get(handler::list_mine))
        .route("/{org_id}/roles", get(handler::my_roles))
}

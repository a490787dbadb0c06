//! Route table for the `/users` resource.

use axum::{Router, routing::get};

use super::{AppState, controller};

/// Routes mounted under `/users`.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::list_users).post(controller::create_user))
        .route(
            "/{id}",
            get(controller::get_user)
                .put(controller::update_user)
                .delete(controller::delete_user),
        )
}

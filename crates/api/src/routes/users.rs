//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at the root, serving the `/users` resource.
///
/// Registration answers with and without the trailing slash because
/// the mobile client posts to `/users/`.
///
/// ```text
/// POST  /users/             -> register (verified identity)
/// POST  /users              -> register (verified identity)
/// GET   /users/me           -> me
/// GET   /users/me/settings  -> get_settings
/// PATCH /users/me/settings  -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", post(users::register))
        .route("/users", post(users::register))
        .route("/users/me", get(users::me))
        .route(
            "/users/me/settings",
            get(users::get_settings).patch(users::update_settings),
        )
}

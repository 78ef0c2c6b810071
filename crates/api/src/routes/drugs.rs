//! Route definitions for the `/drugs` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{drugs, favorites, recognize};
use crate::state::AppState;

/// Routes mounted at `/drugs`.
///
/// ```text
/// GET  /search?keyword=  -> search (public)
/// GET  /favorites        -> list favorites
/// POST /favorites        -> add favorite
/// POST /recognize        -> recognize pill photo (multipart)
/// ```
///
/// Uploads to `/recognize` may be up to `max_upload_bytes`; every other
/// route keeps axum's default body limit.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/search", get(drugs::search))
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route(
            "/recognize",
            post(recognize::recognize).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

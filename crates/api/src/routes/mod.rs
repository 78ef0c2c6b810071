pub mod drugs;
pub mod health;
pub mod users;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /drugs/search                  name search (public)
/// /drugs/favorites               list, add (registered)
/// /drugs/recognize               pill photo recognition (registered)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new().nest("/drugs", drugs::router(config.recognize_max_upload_bytes))
}

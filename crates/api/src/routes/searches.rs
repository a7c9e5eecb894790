//! Mounted at `/searches` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::search_history;
use crate::state::AppState;

/// ```text
/// GET    /recent                 -> list_recent_searches
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/recent", get(search_history::list_recent_searches))
}

//! Route definitions for properties.
//!
//! Mounted at `/properties` in the API route tree.

use axum::routing::post;
use axum::Router;

use crate::handlers::property_search;
use crate::state::AppState;

/// ```text
/// POST   /search                 -> search_properties
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(property_search::search_properties))
}

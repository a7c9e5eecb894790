pub mod health;
pub mod lookups;
pub mod properties;
pub mod searches;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /properties/search                               property search (optional auth)
///
/// /searches/recent                                 caller's recent searches (requires auth)
///
/// /property-types                                  lookup list
/// /furnishing-types                                lookup list
/// /amenities                                       lookup list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/properties", properties::router())
        .nest("/searches", searches::router())
        .merge(lookups::router())
}

use axum::routing::get;
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// Lookup lists merged at the root of `/api/v1`.
///
/// ```text
/// GET    /property-types         -> list_property_types
/// GET    /furnishing-types       -> list_furnishing_types
/// GET    /amenities              -> list_amenities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/property-types", get(lookups::list_property_types))
        .route("/furnishing-types", get(lookups::list_furnishing_types))
        .route("/amenities", get(lookups::list_amenities))
}

//! Read-only lookup lists used to populate search forms.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use rentwise_db::repositories::LookupRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/property-types
pub async fn list_property_types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = LookupRepo::list_property_types(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/furnishing-types
pub async fn list_furnishing_types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = LookupRepo::list_furnishing_types(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/amenities
pub async fn list_amenities(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = LookupRepo::list_amenities(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

//! Handler for property search.
//!
//! Open to anonymous callers; searches by a signed-in user are recorded.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::search::PropertySearchService;
use crate::state::AppState;

/// POST /api/v1/properties/search
///
/// Body is a JSON object of optional criteria. Responds with
/// `{ "count": n, "results": [...] }`; rejected criteria produce a 400 naming
/// the offending fields.
pub async fn search_properties(
    MaybeAuthUser(caller): MaybeAuthUser,
    State(state): State<AppState>,
    Json(criteria): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let service = PropertySearchService::new(state.pool.clone(), state.config.search.max_results);
    let outcome = service
        .execute_search(criteria, caller.map(|user| user.user_id))
        .await?;

    Ok(Json(outcome))
}

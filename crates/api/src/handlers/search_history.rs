//! Handler for the caller's own search history.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use rentwise_db::repositories::UserSearchRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecentSearchParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/searches/recent?limit=
///
/// Most recent searches first. `limit` defaults to 5 and is capped at 50
/// unless the server is configured otherwise.
pub async fn list_recent_searches(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RecentSearchParams>,
) -> AppResult<impl IntoResponse> {
    let limit = state.config.search.recent_limit(params.limit);
    let searches = UserSearchRepo::list_recent(&state.pool, auth.user_id, limit).await?;
    Ok(Json(DataResponse { data: searches }))
}

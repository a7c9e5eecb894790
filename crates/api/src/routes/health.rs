use axum::extract::State;
use axum::{routing::get, Json, Router};
use rentwise_db::SchemaStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database is reachable, migrated and seeded; `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `null` when the schema could not be inspected.
    pub schema: Option<SchemaStatus>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = rentwise_db::health_check(&state.pool).await.is_ok();

    let schema = if db_healthy {
        match rentwise_db::schema_status(&state.pool).await {
            Ok(schema) => Some(schema),
            Err(e) => {
                tracing::warn!(error = %e, "Schema status unavailable");
                None
            }
        }
    } else {
        None
    };

    let ready = db_healthy && schema.is_some_and(|s| s.is_ready());

    Json(HealthResponse {
        status: if ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

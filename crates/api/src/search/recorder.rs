use rentwise_core::search_history::SearchHistoryEntry;
use rentwise_core::types::DbId;
use rentwise_db::models::search::UserSearch;
use rentwise_db::repositories::UserSearchRepo;
use sqlx::PgPool;
use tokio::task::JoinHandle;

/// Appends one search-history row per authenticated search.
///
/// Recording is append-only; repeating a search adds another row.
#[derive(Clone)]
pub struct SearchHistoryRecorder {
    pool: PgPool,
}

impl SearchHistoryRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the entry and return the stored row.
    pub async fn record(
        &self,
        user_id: DbId,
        entry: &SearchHistoryEntry,
    ) -> Result<UserSearch, sqlx::Error> {
        UserSearchRepo::record(&self.pool, user_id, entry).await
    }

    /// Record on a spawned task. Failures are logged at `warn` and dropped.
    ///
    /// The returned handle may be ignored; callers that need the write to
    /// have landed (tests) can await it.
    pub fn record_in_background(&self, user_id: DbId, entry: SearchHistoryEntry) -> JoinHandle<()> {
        let recorder = self.clone();
        tokio::spawn(async move {
            match recorder.record(user_id, &entry).await {
                Ok(row) => {
                    tracing::debug!(user_id, search_id = row.id, "Search history recorded");
                }
                Err(e) => {
                    tracing::warn!(user_id, error = %e, "Failed to record search history");
                }
            }
        })
    }
}

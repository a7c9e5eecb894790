use rentwise_core::property_search::{build_predicates, SearchCriteria};
use rentwise_core::search_history::SearchHistoryEntry;
use rentwise_core::types::DbId;
use rentwise_db::models::search::PropertySummary;
use rentwise_db::repositories::PropertySearchRepo;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tokio::task::JoinHandle;

use crate::error::AppResult;
use crate::search::recorder::SearchHistoryRecorder;

/// Body of a successful search response.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    /// Number of rows in `results` (after the cap).
    pub count: usize,
    pub results: Vec<PropertySummary>,
    /// Pending history write for authenticated searches.
    #[serde(skip)]
    pub history: Option<JoinHandle<()>>,
}

/// Runs property searches and records them for signed-in callers.
#[derive(Clone)]
pub struct PropertySearchService {
    pool: PgPool,
    recorder: SearchHistoryRecorder,
    max_results: i64,
}

impl PropertySearchService {
    /// `max_results` comes from [`SearchLimits`](crate::config::SearchLimits),
    /// which already holds it under the hard ceiling.
    pub fn new(pool: PgPool, max_results: i64) -> Self {
        let recorder = SearchHistoryRecorder::new(pool.clone());
        Self {
            pool,
            recorder,
            max_results,
        }
    }

    /// Execute a search described by the raw JSON criteria.
    ///
    /// Criteria are parsed and validated before any query runs; a rejection
    /// never records history. Results are ordered by property id and capped
    /// at the configured maximum. When `caller` is set, the literal criteria
    /// are recorded without delaying the response.
    pub async fn execute_search(
        &self,
        raw: Value,
        caller: Option<DbId>,
    ) -> AppResult<SearchOutcome> {
        let criteria = SearchCriteria::from_json(&raw)?;
        let predicates = build_predicates(&criteria)?;

        let start = std::time::Instant::now();
        let results = PropertySearchRepo::search(&self.pool, &predicates, self.max_results).await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            predicates = predicates.len(),
            results = results.len(),
            duration_ms,
            user_id = ?caller,
            "Property search executed",
        );

        let history = caller.map(|user_id| {
            let entry = SearchHistoryEntry::new(raw, &criteria);
            self.recorder.record_in_background(user_id, entry)
        });

        Ok(SearchOutcome {
            count: results.len(),
            results,
            history,
        })
    }
}

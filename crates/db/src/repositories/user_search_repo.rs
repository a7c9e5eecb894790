//! Repository for the append-only `user_searches` table.

use rentwise_core::search_history::SearchHistoryEntry;
use rentwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::search::UserSearch;

const COLUMNS: &str = "\
    id, user_id, location, min_rent::float8 AS min_rent, max_rent::float8 AS max_rent, \
    bedrooms, property_type_id, furnishing_id, search_query, created_at";

/// Records and reads back per-user search history.
pub struct UserSearchRepo;

impl UserSearchRepo {
    /// Append one history row for `user_id`.
    ///
    /// Lookup ids that do not reference an existing row are stored as NULL;
    /// the literal criteria in `search_query` keep the value the user sent.
    pub async fn record(
        pool: &PgPool,
        user_id: DbId,
        entry: &SearchHistoryEntry,
    ) -> Result<UserSearch, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_searches
                (user_id, location, min_rent, max_rent, bedrooms,
                 property_type_id, furnishing_id, search_query)
             VALUES ($1, $2, $3::numeric, $4::numeric, $5,
                     (SELECT id FROM property_types WHERE id = $6),
                     (SELECT id FROM furnishing_types WHERE id = $7),
                     $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSearch>(&query)
            .bind(user_id)
            .bind(&entry.location)
            .bind(entry.min_rent)
            .bind(entry.max_rent)
            .bind(entry.bedrooms)
            .bind(entry.property_type_id)
            .bind(entry.furnishing_id)
            .bind(&entry.search_query)
            .fetch_one(pool)
            .await
    }

    /// A user's most recent searches, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<UserSearch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_searches
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, UserSearch>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_searches WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}

//! Denormalized fields stored alongside each recorded search.
//!
//! The literal criteria are kept as JSON; the handful of filters that
//! recommendations and dashboards group by are copied into scalar columns so
//! they never have to re-parse the JSON.

use serde_json::Value;

use crate::property_search::SearchCriteria;
use crate::types::DbId;

/// Longest location text stored in the scalar `location` column.
pub const MAX_HISTORY_LOCATION_LEN: usize = 255;

/// One search-history row before insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistoryEntry {
    pub location: Option<String>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    pub bedrooms: Option<i32>,
    pub property_type_id: Option<DbId>,
    pub furnishing_id: Option<DbId>,
    /// The criteria as the caller sent them, minus any NUL characters.
    pub search_query: Value,
}

impl SearchHistoryEntry {
    /// Build an entry from the raw request body and its parsed criteria.
    pub fn new(raw: Value, criteria: &SearchCriteria) -> Self {
        Self {
            location: criteria
                .location_text()
                .map(|s| s.chars().take(MAX_HISTORY_LOCATION_LEN).collect()),
            min_rent: criteria.min_rent,
            max_rent: criteria.max_rent,
            bedrooms: criteria.bedrooms,
            property_type_id: criteria.property_type,
            furnishing_id: criteria.furnishing,
            search_query: strip_nul(raw),
        }
    }
}

/// Remove U+0000 from every string and key; `jsonb` cannot store it.
fn strip_nul(value: Value) -> Value {
    match value {
        Value::String(s) if s.contains('\0') => Value::String(s.replace('\0', "")),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nul).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.replace('\0', ""), strip_nul(v)))
                .collect(),
        ),
        other => other,
    }
}

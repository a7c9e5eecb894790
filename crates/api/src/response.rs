//! Shared response envelope types for API handlers.
//!
//! Lookup and history responses use a `{ "data": ... }` envelope. The search
//! endpoint returns its own `{ "count", "results" }` body.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

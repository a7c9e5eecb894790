//! Address entity model and DTOs.

use rentwise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `addresses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Address {
    pub id: DbId,
    pub street_address: String,
    pub apartment_number: Option<String>,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub landmark: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAddress {
    pub street_address: String,
    pub apartment_number: Option<String>,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    /// Defaults to `India` if omitted.
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub landmark: Option<String>,
}

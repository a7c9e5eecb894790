//! Listing entity model and DTOs.
//!
//! Money columns are `NUMERIC(10,2)` in the database and are read through a
//! `::float8` cast.

use rentwise_core::rental::{ListingStatus, ListingType};
use rentwise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub property_id: DbId,
    pub monthly_rent: f64,
    pub security_deposit: f64,
    pub maintenance_charges: f64,
    pub brokerage_fee: f64,
    pub listing_type: Option<String>,
    pub listing_status: String,
    pub negotiable: bool,
    pub immediately_available: bool,
    pub listing_date: Timestamp,
    pub expiry_date: Option<Timestamp>,
    pub views_count: i32,
    pub contact_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListing {
    pub property_id: DbId,
    pub monthly_rent: f64,
    pub security_deposit: f64,
    pub maintenance_charges: Option<f64>,
    pub brokerage_fee: Option<f64>,
    pub listing_type: Option<ListingType>,
    /// Defaults to `active` if omitted.
    pub listing_status: Option<ListingStatus>,
    pub negotiable: Option<bool>,
    pub immediately_available: Option<bool>,
    pub expiry_date: Option<Timestamp>,
}

/// Fields an owner may change on an existing listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListing {
    pub monthly_rent: Option<f64>,
    pub security_deposit: Option<f64>,
    pub maintenance_charges: Option<f64>,
    pub brokerage_fee: Option<f64>,
    pub listing_status: Option<ListingStatus>,
    pub negotiable: Option<bool>,
    pub immediately_available: Option<bool>,
    pub expiry_date: Option<Timestamp>,
}

//! Lookup tables: property types, furnishing types and amenities.

use rentwise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `property_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyType {
    pub id: DbId,
    pub type_name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `furnishing_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FurnishingType {
    pub id: DbId,
    pub furnishing_type: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `amenities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Amenity {
    pub id: DbId,
    pub amenity_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO shared by the name + description lookup tables.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLookup {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for creating an amenity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAmenity {
    pub amenity_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

//! Property entity model, its images, and DTOs.

use std::str::FromStr;

use rentwise_core::rental::PreferredTenant;
use rentwise_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub owner_id: Option<DbId>,
    pub property_type_id: DbId,
    pub address_id: DbId,
    pub furnishing_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub total_area_sqft: Option<i32>,
    pub carpet_area_sqft: Option<i32>,
    pub floor_number: Option<i32>,
    pub total_floors: Option<i32>,
    pub parking_available: bool,
    pub parking_spaces: i32,
    pub balcony_count: i32,
    pub preferred_tenant: Option<String>,
    pub available_from: Option<Date>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Property {
    /// The stored tenant preference, if it is set and recognised.
    pub fn tenant_preference(&self) -> Option<PreferredTenant> {
        self.preferred_tenant
            .as_deref()
            .and_then(|s| PreferredTenant::from_str(s).ok())
    }
}

/// DTO for creating a new property.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProperty {
    pub owner_id: Option<DbId>,
    pub property_type_id: DbId,
    pub address_id: DbId,
    pub furnishing_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub total_area_sqft: Option<i32>,
    pub carpet_area_sqft: Option<i32>,
    pub floor_number: Option<i32>,
    pub total_floors: Option<i32>,
    pub parking_available: bool,
    pub parking_spaces: i32,
    pub balcony_count: i32,
    pub preferred_tenant: Option<PreferredTenant>,
    pub available_from: Option<Date>,
}

/// Fields an owner may change on an existing property.
///
/// Ownership, address and the creation timestamp are deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProperty {
    pub property_type_id: Option<DbId>,
    pub furnishing_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub total_area_sqft: Option<i32>,
    pub parking_available: Option<bool>,
    pub parking_spaces: Option<i32>,
    pub preferred_tenant: Option<PreferredTenant>,
    pub available_from: Option<Date>,
    pub is_active: Option<bool>,
}

/// A row from the `property_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyImage {
    pub id: DbId,
    pub property_id: DbId,
    pub image_url: String,
    pub image_type: String,
    pub image_order: i32,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching an image to a property.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePropertyImage {
    pub image_url: String,
    /// Defaults to `main` if omitted.
    pub image_type: Option<String>,
    pub image_order: Option<i32>,
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

//! Search result summaries and recorded search history.

use rentwise_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Property summaries
// ---------------------------------------------------------------------------

/// Compact representation of a matched property returned by search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySummary {
    pub id: DbId,
    pub title: String,
    pub property_type_name: String,
    pub furnishing_type_name: Option<String>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub total_area_sqft: Option<i32>,
    pub address: AddressSummary,
    pub owner_name: Option<String>,
    pub primary_image: Option<PrimaryImage>,
    pub current_listing: Option<CurrentListing>,
    pub available_from: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressSummary {
    pub street_address: String,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryImage {
    pub id: DbId,
    pub image_url: String,
    pub caption: Option<String>,
}

/// The most recently listed active listing of a property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentListing {
    pub id: DbId,
    pub monthly_rent: f64,
    pub security_deposit: f64,
    pub negotiable: bool,
}

/// Flat row produced by the summary query; nested into [`PropertySummary`].
#[derive(Debug, Clone, FromRow)]
pub struct PropertySummaryRow {
    pub id: DbId,
    pub title: String,
    pub property_type_name: String,
    pub furnishing_type_name: Option<String>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub total_area_sqft: Option<i32>,
    pub available_from: Option<Date>,
    pub street_address: String,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub owner_name: Option<String>,
    pub image_id: Option<DbId>,
    pub image_url: Option<String>,
    pub image_caption: Option<String>,
    pub listing_id: Option<DbId>,
    pub listing_monthly_rent: Option<f64>,
    pub listing_security_deposit: Option<f64>,
    pub listing_negotiable: Option<bool>,
}

impl From<PropertySummaryRow> for PropertySummary {
    fn from(row: PropertySummaryRow) -> Self {
        let primary_image = match (row.image_id, row.image_url) {
            (Some(id), Some(image_url)) => Some(PrimaryImage {
                id,
                image_url,
                caption: row.image_caption,
            }),
            _ => None,
        };
        let current_listing = match (
            row.listing_id,
            row.listing_monthly_rent,
            row.listing_security_deposit,
        ) {
            (Some(id), Some(monthly_rent), Some(security_deposit)) => Some(CurrentListing {
                id,
                monthly_rent,
                security_deposit,
                negotiable: row.listing_negotiable.unwrap_or(false),
            }),
            _ => None,
        };

        Self {
            id: row.id,
            title: row.title,
            property_type_name: row.property_type_name,
            furnishing_type_name: row.furnishing_type_name,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            total_area_sqft: row.total_area_sqft,
            address: AddressSummary {
                street_address: row.street_address,
                locality: row.locality,
                city: row.city,
                state: row.state,
                pincode: row.pincode,
            },
            owner_name: row.owner_name,
            primary_image,
            current_listing,
            available_from: row.available_from,
        }
    }
}

// ---------------------------------------------------------------------------
// Search history
// ---------------------------------------------------------------------------

/// A row from the `user_searches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSearch {
    pub id: DbId,
    pub user_id: DbId,
    pub location: Option<String>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    pub bedrooms: Option<i32>,
    pub property_type_id: Option<DbId>,
    pub furnishing_id: Option<DbId>,
    pub search_query: serde_json::Value,
    pub created_at: Timestamp,
}

//! Repository for the lookup tables referenced by properties.

use sqlx::PgPool;

use crate::models::lookup::{Amenity, CreateAmenity, CreateLookup, FurnishingType, PropertyType};

const PROPERTY_TYPE_COLUMNS: &str = "id, type_name, description, created_at, updated_at";
const FURNISHING_COLUMNS: &str = "id, furnishing_type, description, created_at, updated_at";
const AMENITY_COLUMNS: &str =
    "id, amenity_name, category, description, created_at, updated_at";

/// Reads and seeds property types, furnishing types and amenities.
pub struct LookupRepo;

impl LookupRepo {
    // -----------------------------------------------------------------------
    // Property types
    // -----------------------------------------------------------------------

    pub async fn create_property_type(
        pool: &PgPool,
        input: &CreateLookup,
    ) -> Result<PropertyType, sqlx::Error> {
        let query = format!(
            "INSERT INTO property_types (type_name, description)
             VALUES ($1, $2)
             RETURNING {PROPERTY_TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, PropertyType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List property types alphabetically.
    pub async fn list_property_types(pool: &PgPool) -> Result<Vec<PropertyType>, sqlx::Error> {
        let query = format!("SELECT {PROPERTY_TYPE_COLUMNS} FROM property_types ORDER BY type_name");
        sqlx::query_as::<_, PropertyType>(&query)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Furnishing types
    // -----------------------------------------------------------------------

    pub async fn create_furnishing_type(
        pool: &PgPool,
        input: &CreateLookup,
    ) -> Result<FurnishingType, sqlx::Error> {
        let query = format!(
            "INSERT INTO furnishing_types (furnishing_type, description)
             VALUES ($1, $2)
             RETURNING {FURNISHING_COLUMNS}"
        );
        sqlx::query_as::<_, FurnishingType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List furnishing types in seed order.
    pub async fn list_furnishing_types(
        pool: &PgPool,
    ) -> Result<Vec<FurnishingType>, sqlx::Error> {
        let query = format!("SELECT {FURNISHING_COLUMNS} FROM furnishing_types ORDER BY id");
        sqlx::query_as::<_, FurnishingType>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_furnishing_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<FurnishingType>, sqlx::Error> {
        let query =
            format!("SELECT {FURNISHING_COLUMNS} FROM furnishing_types WHERE furnishing_type = $1");
        sqlx::query_as::<_, FurnishingType>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Amenities
    // -----------------------------------------------------------------------

    pub async fn create_amenity(
        pool: &PgPool,
        input: &CreateAmenity,
    ) -> Result<Amenity, sqlx::Error> {
        let query = format!(
            "INSERT INTO amenities (amenity_name, category, description)
             VALUES ($1, $2, $3)
             RETURNING {AMENITY_COLUMNS}"
        );
        sqlx::query_as::<_, Amenity>(&query)
            .bind(&input.amenity_name)
            .bind(&input.category)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List amenities grouped by category, then by name.
    pub async fn list_amenities(pool: &PgPool) -> Result<Vec<Amenity>, sqlx::Error> {
        let query = format!(
            "SELECT {AMENITY_COLUMNS} FROM amenities ORDER BY category NULLS LAST, amenity_name"
        );
        sqlx::query_as::<_, Amenity>(&query).fetch_all(pool).await
    }
}

//! Repository for the `properties` table and its amenity/image children.

use rentwise_core::rental::PreferredTenant;
use rentwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::property::{
    CreateProperty, CreatePropertyImage, Property, PropertyImage, UpdateProperty,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, owner_id, property_type_id, address_id, furnishing_id, title, description, \
    bedrooms, bathrooms, total_area_sqft, carpet_area_sqft, floor_number, total_floors, \
    parking_available, parking_spaces, balcony_count, preferred_tenant, available_from, \
    is_active, created_at, updated_at";

const IMAGE_COLUMNS: &str = "\
    id, property_id, image_url, image_type, image_order, caption, is_primary, \
    created_at, updated_at";

/// Provides CRUD operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new property, returning the created row. New properties are active.
    pub async fn create(pool: &PgPool, input: &CreateProperty) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties
                (owner_id, property_type_id, address_id, furnishing_id, title, description,
                 bedrooms, bathrooms, total_area_sqft, carpet_area_sqft, floor_number,
                 total_floors, parking_available, parking_spaces, balcony_count,
                 preferred_tenant, available_from)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(input.owner_id)
            .bind(input.property_type_id)
            .bind(input.address_id)
            .bind(input.furnishing_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.total_area_sqft)
            .bind(input.carpet_area_sqft)
            .bind(input.floor_number)
            .bind(input.total_floors)
            .bind(input.parking_available)
            .bind(input.parking_spaces)
            .bind(input.balcony_count)
            .bind(input.preferred_tenant.map(PreferredTenant::as_str))
            .bind(input.available_from)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's properties, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a property. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                property_type_id = COALESCE($2, property_type_id),
                furnishing_id = COALESCE($3, furnishing_id),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                bedrooms = COALESCE($6, bedrooms),
                bathrooms = COALESCE($7, bathrooms),
                total_area_sqft = COALESCE($8, total_area_sqft),
                parking_available = COALESCE($9, parking_available),
                parking_spaces = COALESCE($10, parking_spaces),
                preferred_tenant = COALESCE($11, preferred_tenant),
                available_from = COALESCE($12, available_from),
                is_active = COALESCE($13, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(input.property_type_id)
            .bind(input.furnishing_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.total_area_sqft)
            .bind(input.parking_available)
            .bind(input.parking_spaces)
            .bind(input.preferred_tenant.map(PreferredTenant::as_str))
            .bind(input.available_from)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Amenities
    // -----------------------------------------------------------------------

    /// Link an amenity to a property. Re-attaching an existing link is a no-op.
    pub async fn attach_amenity(
        pool: &PgPool,
        property_id: DbId,
        amenity_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO property_amenities (property_id, amenity_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_property_amenities_property_amenity DO NOTHING",
        )
        .bind(property_id)
        .bind(amenity_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove an amenity link. Returns `true` if a link was removed.
    pub async fn detach_amenity(
        pool: &PgPool,
        property_id: DbId,
        amenity_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM property_amenities WHERE property_id = $1 AND amenity_id = $2")
                .bind(property_id)
                .bind(amenity_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Amenity ids linked to a property, ascending.
    pub async fn amenity_ids(pool: &PgPool, property_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT amenity_id FROM property_amenities WHERE property_id = $1 ORDER BY amenity_id",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    /// Attach an image. Marking it primary clears the flag on the property's
    /// other images inside the same transaction.
    pub async fn add_image(
        pool: &PgPool,
        property_id: DbId,
        input: &CreatePropertyImage,
    ) -> Result<PropertyImage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary {
            sqlx::query(
                "UPDATE property_images SET is_primary = false, updated_at = NOW()
                 WHERE property_id = $1 AND is_primary",
            )
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "INSERT INTO property_images
                (property_id, image_url, image_type, image_order, caption, is_primary)
             VALUES ($1, $2, COALESCE($3, 'main'), COALESCE($4, 0), $5, $6)
             RETURNING {IMAGE_COLUMNS}"
        );
        let image = sqlx::query_as::<_, PropertyImage>(&query)
            .bind(property_id)
            .bind(&input.image_url)
            .bind(&input.image_type)
            .bind(input.image_order)
            .bind(&input.caption)
            .bind(input.is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// A property's images in display order.
    pub async fn list_images(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<PropertyImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM property_images
             WHERE property_id = $1
             ORDER BY image_order, id"
        );
        sqlx::query_as::<_, PropertyImage>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `listings` table.

use rentwise_core::rental::{ListingStatus, ListingType};
use rentwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::{CreateListing, Listing, UpdateListing};

/// Money columns are `NUMERIC`; cast so they decode as `f64`.
const COLUMNS: &str = "\
    id, property_id, monthly_rent::float8 AS monthly_rent, \
    security_deposit::float8 AS security_deposit, \
    maintenance_charges::float8 AS maintenance_charges, \
    brokerage_fee::float8 AS brokerage_fee, \
    listing_type, listing_status, negotiable, immediately_available, listing_date, \
    expiry_date, views_count, contact_count, created_at, updated_at";

/// Provides CRUD operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    ///
    /// Status defaults to `active`; `negotiable` and `immediately_available`
    /// default to `true`.
    pub async fn create(pool: &PgPool, input: &CreateListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings
                (property_id, monthly_rent, security_deposit, maintenance_charges,
                 brokerage_fee, listing_type, listing_status, negotiable,
                 immediately_available, expiry_date)
             VALUES ($1, $2::numeric, $3::numeric, COALESCE($4::numeric, 0),
                     COALESCE($5::numeric, 0), $6, COALESCE($7, 'active'),
                     COALESCE($8, true), COALESCE($9, true), $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(input.property_id)
            .bind(input.monthly_rent)
            .bind(input.security_deposit)
            .bind(input.maintenance_charges)
            .bind(input.brokerage_fee)
            .bind(input.listing_type.map(ListingType::as_str))
            .bind(input.listing_status.map(ListingStatus::as_str))
            .bind(input.negotiable)
            .bind(input.immediately_available)
            .bind(input.expiry_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All listings of a property, newest first.
    pub async fn list_for_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings
             WHERE property_id = $1
             ORDER BY listing_date DESC, id DESC"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }

    /// Update a listing. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET
                monthly_rent = COALESCE($2::numeric, monthly_rent),
                security_deposit = COALESCE($3::numeric, security_deposit),
                maintenance_charges = COALESCE($4::numeric, maintenance_charges),
                brokerage_fee = COALESCE($5::numeric, brokerage_fee),
                listing_status = COALESCE($6, listing_status),
                negotiable = COALESCE($7, negotiable),
                immediately_available = COALESCE($8, immediately_available),
                expiry_date = COALESCE($9, expiry_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(input.monthly_rent)
            .bind(input.security_deposit)
            .bind(input.maintenance_charges)
            .bind(input.brokerage_fee)
            .bind(input.listing_status.map(ListingStatus::as_str))
            .bind(input.negotiable)
            .bind(input.immediately_available)
            .bind(input.expiry_date)
            .fetch_optional(pool)
            .await
    }

    /// Set a listing's status. Returns `true` if the row exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ListingStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE listings SET listing_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

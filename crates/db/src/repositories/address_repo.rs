//! Repository for the `addresses` table.

use rentwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::address::{Address, CreateAddress};

const COLUMNS: &str = "id, street_address, apartment_number, locality, city, state, pincode, \
                       country, latitude, longitude, landmark, created_at, updated_at";

pub struct AddressRepo;

impl AddressRepo {
    /// Insert a new address, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAddress) -> Result<Address, sqlx::Error> {
        let query = format!(
            "INSERT INTO addresses
                (street_address, apartment_number, locality, city, state, pincode,
                 country, latitude, longitude, landmark)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'India'), $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(&input.street_address)
            .bind(&input.apartment_number)
            .bind(&input.locality)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.pincode)
            .bind(&input.country)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.landmark)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE id = $1");
        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for property search.
//!
//! Renders the predicate list produced by
//! [`build_predicates`](rentwise_core::property_search::build_predicates) into
//! a single parameterised query. Every predicate that reaches into a
//! one-to-many relation (listings, amenities) is expressed as a correlated
//! `EXISTS` or count subquery, so a property matches at most once no matter
//! how many children it has.

use rentwise_core::property_search::{contains_pattern, Predicate};
use rentwise_core::rental::{ListingStatus, PreferredTenant, FURNISHED_NAMES, UNFURNISHED_NAMES};
use rentwise_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::search::{PropertySummary, PropertySummaryRow};

/// Summary projection over the matched ids. The lateral joins pick one
/// primary image and one active listing per property.
const SUMMARY_SELECT: &str = "\
    SELECT p.id, p.title, pt.type_name AS property_type_name, \
           ft.furnishing_type AS furnishing_type_name, \
           p.bedrooms, p.bathrooms, p.total_area_sqft, p.available_from, \
           a.street_address, a.locality, a.city, a.state, a.pincode, \
           NULLIF(TRIM(CONCAT_WS(' ', u.first_name, u.last_name)), '') AS owner_name, \
           img.id AS image_id, img.image_url, img.caption AS image_caption, \
           cl.id AS listing_id, \
           cl.monthly_rent::float8 AS listing_monthly_rent, \
           cl.security_deposit::float8 AS listing_security_deposit, \
           cl.negotiable AS listing_negotiable \
    FROM matched m \
    JOIN properties p ON p.id = m.id \
    JOIN property_types pt ON pt.id = p.property_type_id \
    JOIN addresses a ON a.id = p.address_id \
    LEFT JOIN furnishing_types ft ON ft.id = p.furnishing_id \
    LEFT JOIN users u ON u.id = p.owner_id \
    LEFT JOIN LATERAL ( \
        SELECT i.id, i.image_url, i.caption FROM property_images i \
        WHERE i.property_id = p.id AND i.is_primary \
        ORDER BY i.image_order, i.id LIMIT 1 \
    ) img ON true \
    LEFT JOIN LATERAL ( \
        SELECT l.id, l.monthly_rent, l.security_deposit, l.negotiable FROM listings l \
        WHERE l.property_id = p.id AND l.listing_status = 'active' \
        ORDER BY l.listing_date DESC, l.id DESC LIMIT 1 \
    ) cl ON true \
    ORDER BY p.id";

/// Executes property searches.
pub struct PropertySearchRepo;

impl PropertySearchRepo {
    /// Return the search-visible properties satisfying every predicate,
    /// ordered by id ascending and capped at `limit`.
    ///
    /// A property is search-visible when it is active and has at least one
    /// active listing.
    pub async fn search(
        pool: &PgPool,
        predicates: &[Predicate],
        limit: i64,
    ) -> Result<Vec<PropertySummary>, sqlx::Error> {
        let mut qb = build_search_query(predicates, limit);
        tracing::trace!(sql = qb.sql(), "Rendered property search");
        let rows = qb
            .build_query_as::<PropertySummaryRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PropertySummary::from).collect())
    }

    /// Ids of the matching properties only; same semantics as [`Self::search`].
    pub async fn search_ids(
        pool: &PgPool,
        predicates: &[Predicate],
        limit: i64,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_matched_ids(&mut qb, predicates, limit);
        qb.build_query_scalar::<DbId>().fetch_all(pool).await
    }
}

// ---------------------------------------------------------------------------
// Query rendering
// ---------------------------------------------------------------------------

fn build_search_query(predicates: &[Predicate], limit: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("WITH matched AS (");
    push_matched_ids(&mut qb, predicates, limit);
    qb.push(") ");
    qb.push(SUMMARY_SELECT);
    qb
}

/// `SELECT DISTINCT p.id ...` for the visible, matching properties.
fn push_matched_ids(qb: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate], limit: i64) {
    qb.push(
        "SELECT DISTINCT p.id FROM properties p \
         JOIN addresses a ON a.id = p.address_id \
         WHERE p.is_active \
           AND EXISTS (SELECT 1 FROM listings vl \
                       WHERE vl.property_id = p.id AND vl.listing_status = ",
    );
    qb.push_bind(ListingStatus::Active.as_str());
    qb.push(")");

    for predicate in predicates {
        qb.push(" AND ");
        push_predicate(qb, predicate);
    }

    qb.push(" ORDER BY p.id LIMIT ");
    qb.push_bind(limit);
}

fn push_predicate(qb: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Location(text) => {
            let pattern = contains_pattern(text);
            qb.push("(a.city ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR a.locality ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR a.street_address ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        Predicate::PropertyType(id) => {
            qb.push("p.property_type_id = ").push_bind(*id);
        }
        Predicate::Furnishing(id) => {
            qb.push("p.furnishing_id = ").push_bind(*id);
        }
        Predicate::Bedrooms(n) => {
            qb.push("p.bedrooms = ").push_bind(*n);
        }
        Predicate::MinBathrooms(n) => {
            qb.push("p.bathrooms >= ").push_bind(*n);
        }
        Predicate::AreaRange { min, max } => {
            qb.push("p.total_area_sqft IS NOT NULL");
            if let Some(min) = min {
                qb.push(" AND p.total_area_sqft >= ").push_bind(*min);
            }
            if let Some(max) = max {
                qb.push(" AND p.total_area_sqft <= ").push_bind(*max);
            }
        }
        Predicate::RentRange { min, max } => {
            // Both bounds must hold for the same active listing.
            qb.push("EXISTS (SELECT 1 FROM listings rl WHERE rl.property_id = p.id AND rl.listing_status = ")
                .push_bind(ListingStatus::Active.as_str());
            if let Some(min) = min {
                qb.push(" AND rl.monthly_rent >= ")
                    .push_bind(*min)
                    .push("::numeric");
            }
            if let Some(max) = max {
                qb.push(" AND rl.monthly_rent <= ")
                    .push_bind(*max)
                    .push("::numeric");
            }
            qb.push(")");
        }
        Predicate::TenantPreference(tenant) => {
            qb.push("(p.preferred_tenant = ")
                .push_bind(tenant.as_str())
                .push(" OR p.preferred_tenant = ")
                .push_bind(PreferredTenant::Any.as_str())
                .push(")");
        }
        Predicate::ParkingAvailable => {
            qb.push("p.parking_available");
        }
        Predicate::AvailableBy(date) => {
            qb.push("p.available_from <= ").push_bind(*date);
        }
        Predicate::HasAllAmenities(ids) => {
            qb.push(
                "(SELECT COUNT(DISTINCT pa.amenity_id) FROM property_amenities pa \
                 WHERE pa.property_id = p.id AND pa.amenity_id = ANY(",
            )
            .push_bind(ids.clone())
            .push(")) = ")
            .push_bind(ids.len() as i64);
        }
        Predicate::ImmediatelyAvailable => {
            qb.push(
                "EXISTS (SELECT 1 FROM listings il \
                 WHERE il.property_id = p.id AND il.immediately_available \
                   AND il.listing_status = ",
            )
            .push_bind(ListingStatus::Active.as_str())
            .push(")");
        }
        Predicate::Furnished(furnished) => {
            let names = if *furnished {
                FURNISHED_NAMES
            } else {
                UNFURNISHED_NAMES
            };
            qb.push(
                "EXISTS (SELECT 1 FROM furnishing_types fft \
                 WHERE fft.id = p.furnishing_id AND fft.furnishing_type = ANY(",
            )
            .push_bind(names.iter().map(|n| n.to_string()).collect::<Vec<String>>())
            .push("))");
        }
    }
}

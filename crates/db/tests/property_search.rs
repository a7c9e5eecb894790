//! Search semantics against a real database.
//!
//! Each test seeds a handful of properties through the repositories and runs
//! the predicates produced from JSON criteria.

use rentwise_core::property_search::{build_predicates, SearchCriteria, MAX_SEARCH_RESULTS};
use rentwise_core::rental::{ListingStatus, PreferredTenant};
use rentwise_core::types::{Date, DbId};
use rentwise_db::models::address::CreateAddress;
use rentwise_db::models::listing::CreateListing;
use rentwise_db::models::lookup::{CreateAmenity, CreateLookup};
use rentwise_db::models::property::{CreateProperty, CreatePropertyImage, UpdateProperty};
use rentwise_db::repositories::{
    AddressRepo, ListingRepo, LookupRepo, PropertyRepo, PropertySearchRepo,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const FULLY_FURNISHED: DbId = 1;
const SEMI_FURNISHED: DbId = 2;
const UNFURNISHED: DbId = 3;

struct Seed {
    locality: &'static str,
    city: &'static str,
    bedrooms: i32,
    bathrooms: i32,
    area: Option<i32>,
    furnishing: Option<DbId>,
    tenant: Option<PreferredTenant>,
    parking: bool,
    available_from: Option<Date>,
    listings: Vec<(f64, ListingStatus)>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            locality: "Koramangala",
            city: "Bengaluru",
            bedrooms: 2,
            bathrooms: 2,
            area: Some(1100),
            furnishing: Some(SEMI_FURNISHED),
            tenant: Some(PreferredTenant::Family),
            parking: true,
            available_from: None,
            listings: vec![(30000.0, ListingStatus::Active)],
        }
    }
}

async fn property_type(pool: &PgPool, name: &str) -> DbId {
    LookupRepo::create_property_type(
        pool,
        &CreateLookup {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn amenity(pool: &PgPool, name: &str) -> DbId {
    LookupRepo::create_amenity(
        pool,
        &CreateAmenity {
            amenity_name: name.to_string(),
            category: None,
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed(pool: &PgPool, property_type_id: DbId, seed: Seed) -> DbId {
    let address = AddressRepo::create(
        pool,
        &CreateAddress {
            street_address: "1 Test Street".to_string(),
            locality: seed.locality.to_string(),
            city: seed.city.to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let property = PropertyRepo::create(
        pool,
        &CreateProperty {
            owner_id: None,
            property_type_id,
            address_id: address.id,
            furnishing_id: seed.furnishing,
            title: format!("{} home", seed.locality),
            description: None,
            bedrooms: seed.bedrooms,
            bathrooms: seed.bathrooms,
            total_area_sqft: seed.area,
            carpet_area_sqft: None,
            floor_number: None,
            total_floors: None,
            parking_available: seed.parking,
            parking_spaces: if seed.parking { 1 } else { 0 },
            balcony_count: 0,
            preferred_tenant: seed.tenant,
            available_from: seed.available_from,
        },
    )
    .await
    .unwrap();

    for (rent, status) in seed.listings {
        add_listing(pool, property.id, rent, status, false).await;
    }

    property.id
}

async fn add_listing(
    pool: &PgPool,
    property_id: DbId,
    rent: f64,
    status: ListingStatus,
    immediately_available: bool,
) {
    ListingRepo::create(
        pool,
        &CreateListing {
            property_id,
            monthly_rent: rent,
            security_deposit: rent * 3.0,
            maintenance_charges: None,
            brokerage_fee: None,
            listing_type: None,
            listing_status: Some(status),
            negotiable: None,
            immediately_available: Some(immediately_available),
            expiry_date: None,
        },
    )
    .await
    .unwrap();
}

async fn search(pool: &PgPool, criteria: Value) -> Vec<DbId> {
    let criteria = SearchCriteria::from_json(&criteria).unwrap();
    let predicates = build_predicates(&criteria).unwrap();
    PropertySearchRepo::search_ids(pool, &predicates, MAX_SEARCH_RESULTS)
        .await
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_koramangala_example(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let gym = amenity(&pool, "Gym").await;
    let pool_amenity = amenity(&pool, "Swimming Pool").await;

    let hit = seed(&pool, apartment, Seed::default()).await;
    PropertyRepo::attach_amenity(&pool, hit, gym).await.unwrap();
    PropertyRepo::attach_amenity(&pool, hit, pool_amenity).await.unwrap();

    // Wrong bedroom count.
    let miss = seed(&pool, apartment, Seed { bedrooms: 3, ..Default::default() }).await;
    PropertyRepo::attach_amenity(&pool, miss, gym).await.unwrap();
    PropertyRepo::attach_amenity(&pool, miss, pool_amenity).await.unwrap();

    let ids = search(
        &pool,
        json!({
            "location": "koramangala",
            "bedrooms": 2,
            "min_rent": 20000,
            "max_rent": 35000,
            "amenities": format!("{gym},{pool_amenity}"),
        }),
    )
    .await;
    assert_eq!(ids, vec![hit]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_children_do_not_duplicate_results(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let a = amenity(&pool, "Gym").await;
    let b = amenity(&pool, "Lift").await;
    let c = amenity(&pool, "Power Backup").await;
    let id = seed(
        &pool,
        apartment,
        Seed {
            listings: vec![(25000.0, ListingStatus::Active), (26000.0, ListingStatus::Active)],
            ..Default::default()
        },
    )
    .await;
    for amenity_id in [a, b, c] {
        PropertyRepo::attach_amenity(&pool, id, amenity_id).await.unwrap();
    }

    let ids = search(&pool, json!({ "amenities": [a, b, c], "min_rent": 20000 })).await;
    assert_eq!(ids, vec![id]);

    let predicates = build_predicates(&SearchCriteria::default()).unwrap();
    let summaries = PropertySearchRepo::search(&pool, &predicates, MAX_SEARCH_RESULTS)
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_visibility_requires_active_property_and_listing(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let visible = seed(&pool, apartment, Seed::default()).await;
    let _rented_only = seed(
        &pool,
        apartment,
        Seed {
            listings: vec![(30000.0, ListingStatus::Rented)],
            ..Default::default()
        },
    )
    .await;
    let _no_listing = seed(&pool, apartment, Seed { listings: vec![], ..Default::default() }).await;
    let inactive = seed(&pool, apartment, Seed::default()).await;
    PropertyRepo::update(
        &pool,
        inactive,
        &UpdateProperty {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(search(&pool, json!({})).await, vec![visible]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rent_bounds_are_inclusive_and_ignore_inactive_listings(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let at_max = seed(&pool, apartment, Seed::default()).await;
    let _above = seed(
        &pool,
        apartment,
        Seed {
            listings: vec![(30000.01, ListingStatus::Active)],
            ..Default::default()
        },
    )
    .await;
    // Cheap listing is inactive; the active one is out of range.
    let _stale_price = seed(
        &pool,
        apartment,
        Seed {
            listings: vec![(20000.0, ListingStatus::Inactive), (40000.0, ListingStatus::Active)],
            ..Default::default()
        },
    )
    .await;

    let ids = search(&pool, json!({ "min_rent": 30000, "max_rent": 30000 })).await;
    assert_eq!(ids, vec![at_max]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rent_bounds_must_hold_for_one_listing(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let _split = seed(
        &pool,
        apartment,
        Seed {
            listings: vec![(10000.0, ListingStatus::Active), (50000.0, ListingStatus::Active)],
            ..Default::default()
        },
    )
    .await;

    assert!(search(&pool, json!({ "min_rent": 20000, "max_rent": 30000 }))
        .await
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tenant_preference_matches_wildcard(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let family = seed(&pool, apartment, Seed::default()).await;
    let any = seed(
        &pool,
        apartment,
        Seed {
            tenant: Some(PreferredTenant::Any),
            ..Default::default()
        },
    )
    .await;
    let _company = seed(
        &pool,
        apartment,
        Seed {
            tenant: Some(PreferredTenant::Company),
            ..Default::default()
        },
    )
    .await;
    let _unset = seed(&pool, apartment, Seed { tenant: None, ..Default::default() }).await;

    let ids = search(&pool, json!({ "preferred_tenant": "family" })).await;
    assert_eq!(ids, vec![family, any]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_area_and_date_filters_exclude_missing_values(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let sized = seed(
        &pool,
        apartment,
        Seed {
            available_from: Some(date(2026, 10, 1)),
            ..Default::default()
        },
    )
    .await;
    let _unsized = seed(&pool, apartment, Seed { area: None, ..Default::default() }).await;
    let _later = seed(
        &pool,
        apartment,
        Seed {
            available_from: Some(date(2027, 1, 1)),
            ..Default::default()
        },
    )
    .await;

    assert_eq!(
        search(&pool, json!({ "min_area": 1000, "available_from": "2026-12-01" })).await,
        vec![sized]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_location_matches_city_and_escapes_wildcards(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let pune = seed(
        &pool,
        apartment,
        Seed {
            locality: "Baner",
            city: "Pune",
            ..Default::default()
        },
    )
    .await;
    let _blr = seed(&pool, apartment, Seed::default()).await;

    assert_eq!(search(&pool, json!({ "location": "PUNE" })).await, vec![pune]);
    assert!(search(&pool, json!({ "location": "%" })).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_furnished_and_furnishing_filters(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let full = seed(
        &pool,
        apartment,
        Seed {
            furnishing: Some(FULLY_FURNISHED),
            ..Default::default()
        },
    )
    .await;
    let semi = seed(&pool, apartment, Seed::default()).await;
    let bare = seed(
        &pool,
        apartment,
        Seed {
            furnishing: Some(UNFURNISHED),
            ..Default::default()
        },
    )
    .await;

    assert_eq!(search(&pool, json!({ "furnished": true })).await, vec![full, semi]);
    assert_eq!(search(&pool, json!({ "furnished": false })).await, vec![bare]);
    assert_eq!(search(&pool, json!({ "furnishing": UNFURNISHED })).await, vec![bare]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_immediately_available_needs_an_active_immediate_listing(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let no_listings = || Seed {
        listings: vec![],
        ..Default::default()
    };

    let ready = seed(&pool, apartment, no_listings()).await;
    add_listing(&pool, ready, 30000.0, ListingStatus::Active, false).await;
    add_listing(&pool, ready, 31000.0, ListingStatus::Active, true).await;

    let later = seed(&pool, apartment, no_listings()).await;
    add_listing(&pool, later, 30000.0, ListingStatus::Active, false).await;

    // The immediate listing is no longer live.
    let stale = seed(&pool, apartment, no_listings()).await;
    add_listing(&pool, stale, 30000.0, ListingStatus::Active, false).await;
    add_listing(&pool, stale, 29000.0, ListingStatus::Inactive, true).await;

    assert_eq!(search(&pool, json!({ "immediately_available": true })).await, vec![ready]);
    assert_eq!(
        search(&pool, json!({ "immediately_available": false })).await,
        vec![ready, later, stale]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parking_required_excludes_properties_without_parking(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let with_parking = seed(&pool, apartment, Seed::default()).await;
    let without = seed(&pool, apartment, Seed { parking: false, ..Default::default() }).await;

    assert_eq!(search(&pool, json!({ "parking_required": true })).await, vec![with_parking]);
    assert_eq!(
        search(&pool, json!({ "parking_required": false })).await,
        vec![with_parking, without]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bathrooms_is_a_minimum(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let _one = seed(&pool, apartment, Seed { bathrooms: 1, ..Default::default() }).await;
    let two = seed(&pool, apartment, Seed { bathrooms: 2, ..Default::default() }).await;
    let three = seed(&pool, apartment, Seed { bathrooms: 3, ..Default::default() }).await;

    assert_eq!(search(&pool, json!({ "bathrooms": 2 })).await, vec![two, three]);
    assert_eq!(search(&pool, json!({ "bathrooms": 4 })).await, Vec::<DbId>::new());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_property_type_filter(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let villa = property_type(&pool, "Independent House").await;
    let flat = seed(&pool, apartment, Seed::default()).await;
    let house = seed(&pool, villa, Seed::default()).await;

    assert_eq!(search(&pool, json!({ "property_type": apartment })).await, vec![flat]);
    assert_eq!(search(&pool, json!({ "property_type": villa })).await, vec![house]);
    assert!(search(&pool, json!({ "property_type": villa + 100 })).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_results_are_capped_and_ordered(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let mut ids = Vec::new();
    for _ in 0..(MAX_SEARCH_RESULTS + 5) {
        ids.push(seed(&pool, apartment, Seed::default()).await);
    }

    let found = search(&pool, json!({})).await;
    assert_eq!(found.len(), MAX_SEARCH_RESULTS as usize);
    assert_eq!(found, &ids[..MAX_SEARCH_RESULTS as usize]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_shape(pool: PgPool) {
    let apartment = property_type(&pool, "Apartment").await;
    let id = seed(&pool, apartment, Seed::default()).await;
    let image = PropertyRepo::add_image(
        &pool,
        id,
        &CreatePropertyImage {
            image_url: "/media/front.jpg".to_string(),
            image_type: None,
            image_order: None,
            caption: Some("Front".to_string()),
            is_primary: true,
        },
    )
    .await
    .unwrap();

    let predicates = build_predicates(&SearchCriteria::default()).unwrap();
    let summaries = PropertySearchRepo::search(&pool, &predicates, MAX_SEARCH_RESULTS)
        .await
        .unwrap();
    let summary = &summaries[0];

    assert_eq!(summary.id, id);
    assert_eq!(summary.property_type_name, "Apartment");
    assert_eq!(summary.furnishing_type_name.as_deref(), Some("Semi Furnished"));
    assert_eq!(summary.address.locality, "Koramangala");
    assert_eq!(summary.owner_name, None);
    assert_eq!(summary.primary_image.as_ref().map(|i| i.id), Some(image.id));
    let listing = summary.current_listing.as_ref().expect("active listing");
    assert_eq!(listing.monthly_rent, 30000.0);
    assert_eq!(listing.security_deposit, 90000.0);
}

//! Integration tests for the marketplace repositories.
//!
//! - Typed property and listing updates leave unspecified columns alone
//! - Amenity links are idempotent
//! - Primary image flag is exclusive per property
//! - Search history append and recency ordering

use rentwise_core::property_search::SearchCriteria;
use rentwise_core::rental::{ListingStatus, PreferredTenant, UserType};
use rentwise_core::search_history::SearchHistoryEntry;
use rentwise_db::models::address::CreateAddress;
use rentwise_db::models::listing::{CreateListing, UpdateListing};
use rentwise_db::models::lookup::{CreateAmenity, CreateLookup};
use rentwise_db::models::property::{CreateProperty, CreatePropertyImage, UpdateProperty};
use rentwise_db::models::user::CreateUser;
use rentwise_db::repositories::{
    AddressRepo, ListingRepo, LookupRepo, PropertyRepo, UserRepo, UserSearchRepo,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, user_type: UserType) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        user_type,
        phone_number: None,
    }
}

async fn new_property(pool: &PgPool, owner_id: i64) -> i64 {
    let property_type = LookupRepo::create_property_type(
        pool,
        &CreateLookup {
            name: "Apartment".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let address = AddressRepo::create(
        pool,
        &CreateAddress {
            street_address: "12 Main Road".to_string(),
            locality: "Indiranagar".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560038".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(address.country, "India");

    let property = PropertyRepo::create(
        pool,
        &CreateProperty {
            owner_id: Some(owner_id),
            property_type_id: property_type.id,
            address_id: address.id,
            furnishing_id: Some(1),
            title: "Bright 2BHK".to_string(),
            description: Some("Near metro".to_string()),
            bedrooms: 2,
            bathrooms: 2,
            total_area_sqft: Some(1000),
            carpet_area_sqft: None,
            floor_number: Some(3),
            total_floors: Some(6),
            parking_available: true,
            parking_spaces: 1,
            balcony_count: 1,
            preferred_tenant: Some(PreferredTenant::Family),
            available_from: None,
        },
    )
    .await
    .unwrap();
    assert!(property.is_active);
    property.id
}

fn new_listing(property_id: i64, rent: f64) -> CreateListing {
    CreateListing {
        property_id,
        monthly_rent: rent,
        security_deposit: rent * 2.0,
        maintenance_charges: None,
        brokerage_fee: None,
        listing_type: None,
        listing_status: None,
        negotiable: None,
        immediately_available: None,
        expiry_date: None,
    }
}

// ---------------------------------------------------------------------------
// Properties and listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_property_update_applies_only_given_fields(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner", UserType::Owner))
        .await
        .unwrap();
    let id = new_property(&pool, owner.id).await;

    let updated = PropertyRepo::update(
        &pool,
        id,
        &UpdateProperty {
            bedrooms: Some(3),
            preferred_tenant: Some(PreferredTenant::Any),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("property exists");

    assert_eq!(updated.bedrooms, 3);
    assert_eq!(updated.tenant_preference(), Some(PreferredTenant::Any));
    assert_eq!(updated.title, "Bright 2BHK");
    assert_eq!(updated.owner_id, Some(owner.id));
    assert!(updated.updated_at >= updated.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_property_returns_none(pool: PgPool) {
    let result = PropertyRepo::update(&pool, 9999, &UpdateProperty::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_defaults_and_update(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner", UserType::Owner))
        .await
        .unwrap();
    let property_id = new_property(&pool, owner.id).await;

    let listing = ListingRepo::create(&pool, &new_listing(property_id, 25000.5))
        .await
        .unwrap();
    assert_eq!(listing.listing_status, "active");
    assert_eq!(listing.monthly_rent, 25000.5);
    assert_eq!(listing.maintenance_charges, 0.0);
    assert!(listing.negotiable);
    assert!(listing.immediately_available);

    let updated = ListingRepo::update(
        &pool,
        listing.id,
        &UpdateListing {
            monthly_rent: Some(27000.0),
            listing_status: Some(ListingStatus::Rented),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.monthly_rent, 27000.0);
    assert_eq!(updated.listing_status, "rented");
    assert_eq!(updated.security_deposit, 50001.0);

    assert!(ListingRepo::set_status(&pool, listing.id, ListingStatus::Active)
        .await
        .unwrap());
    let listings = ListingRepo::list_for_property(&pool, property_id).await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].listing_status, "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attach_amenity_is_idempotent(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner", UserType::Owner))
        .await
        .unwrap();
    let property_id = new_property(&pool, owner.id).await;
    let gym = LookupRepo::create_amenity(
        &pool,
        &CreateAmenity {
            amenity_name: "Gym".to_string(),
            category: Some("Fitness".to_string()),
            description: None,
        },
    )
    .await
    .unwrap();

    PropertyRepo::attach_amenity(&pool, property_id, gym.id).await.unwrap();
    PropertyRepo::attach_amenity(&pool, property_id, gym.id).await.unwrap();
    assert_eq!(
        PropertyRepo::amenity_ids(&pool, property_id).await.unwrap(),
        vec![gym.id]
    );

    assert!(PropertyRepo::detach_amenity(&pool, property_id, gym.id).await.unwrap());
    assert!(PropertyRepo::amenity_ids(&pool, property_id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_primary_image_is_exclusive(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner", UserType::Owner))
        .await
        .unwrap();
    let property_id = new_property(&pool, owner.id).await;

    let image = |url: &str, order: i32| CreatePropertyImage {
        image_url: url.to_string(),
        image_type: None,
        image_order: Some(order),
        caption: None,
        is_primary: true,
    };
    PropertyRepo::add_image(&pool, property_id, &image("/a.jpg", 0)).await.unwrap();
    PropertyRepo::add_image(&pool, property_id, &image("/b.jpg", 1)).await.unwrap();

    let images = PropertyRepo::list_images(&pool, property_id).await.unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].image_type, "main");
    let primaries: Vec<_> = images.iter().filter(|i| i.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].image_url, "/b.jpg");
}

// ---------------------------------------------------------------------------
// Search history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_is_appended_and_listed_newest_first(pool: PgPool) {
    let tenant = UserRepo::create(&pool, &new_user("tenant", UserType::Tenant))
        .await
        .unwrap();

    for location in ["Koramangala", "HSR Layout", "Whitefield"] {
        let raw = json!({ "location": location, "min_rent": 10000, "max_rent": 20000 });
        let criteria = SearchCriteria::from_json(&raw).unwrap();
        UserSearchRepo::record(&pool, tenant.id, &SearchHistoryEntry::new(raw, &criteria))
            .await
            .unwrap();
    }

    assert_eq!(UserSearchRepo::count_for_user(&pool, tenant.id).await.unwrap(), 3);

    let recent = UserSearchRepo::list_recent(&pool, tenant.id, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].location.as_deref(), Some("Whitefield"));
    assert_eq!(recent[1].location.as_deref(), Some("HSR Layout"));
    assert_eq!(recent[0].min_rent, Some(10000.0));
    assert_eq!(recent[0].search_query["max_rent"], json!(20000));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_nulls_unknown_lookup_ids(pool: PgPool) {
    let tenant = UserRepo::create(&pool, &new_user("tenant", UserType::Tenant))
        .await
        .unwrap();
    let raw = json!({ "property_type": 424242, "furnishing": 1 });
    let criteria = SearchCriteria::from_json(&raw).unwrap();

    let row = UserSearchRepo::record(&pool, tenant.id, &SearchHistoryEntry::new(raw, &criteria))
        .await
        .unwrap();

    assert_eq!(row.property_type_id, None);
    assert_eq!(row.furnishing_id, Some(1));
    assert_eq!(row.search_query["property_type"], json!(424242));
}

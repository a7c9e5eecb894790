//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod address_repo;
pub mod listing_repo;
pub mod lookup_repo;
pub mod property_repo;
pub mod property_search_repo;
pub mod user_repo;
pub mod user_search_repo;

pub use address_repo::AddressRepo;
pub use listing_repo::ListingRepo;
pub use lookup_repo::LookupRepo;
pub use property_repo::PropertyRepo;
pub use property_search_repo::PropertySearchRepo;
pub use user_repo::UserRepo;
pub use user_search_repo::UserSearchRepo;

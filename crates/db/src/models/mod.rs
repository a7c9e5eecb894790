//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where the entity is mutable, an update DTO whose `Option` fields are the
//!   complete whitelist of columns callers may change

pub mod address;
pub mod listing;
pub mod lookup;
pub mod property;
pub mod search;
pub mod user;

//! Domain logic shared by the repository and HTTP layers.
//!
//! Nothing in this crate performs I/O. Criteria parsing, validation and the
//! filter predicate builder are pure functions.

pub mod error;
pub mod property_search;
pub mod rental;
pub mod search_history;
pub mod types;

pub mod lookups;
pub mod property_search;
pub mod search_history;

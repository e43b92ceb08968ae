//! SQLite repositories

pub mod search;

pub use search::search_ids;

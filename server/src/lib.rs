//! TD Jobs filter engine
//!
//! Compiles JSON search filters for jobs, offers, invitations and offer
//! records into parameterized SQL predicates, and runs them against SQLite or
//! PostgreSQL.

pub mod app;
pub mod core;
pub mod data;
pub mod utils;

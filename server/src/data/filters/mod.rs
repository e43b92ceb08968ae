//! Dynamic filter compiler
//!
//! Turns a JSON filter document into a parameterized predicate. Keys are
//! column names, `$and`/`$or` groups, or (below a JSON column) nested keys.
//! Values are literals for equality or a map of modifiers (`gt`, `lt`, `geq`,
//! `leq`, `like`, `in`).
//!
//! ## Usage
//!
//! ```no_run
//! use tdjobs_server::data::filters::{SchemaAllowlist, columns, compile_filter};
//!
//! let allowlist = SchemaAllowlist::new(columns::JOB_FILTERABLE.iter().copied())
//!     .with_json_fields(columns::METADATA_COLUMNS.iter().copied());
//! let raw = r#"{"status": "ACTIVE", "metadata": {"price": {"lt": 5}}}"#;
//! let predicate = compile_filter(raw, &allowlist).unwrap();
//! assert_eq!(predicate.text(), "status = ? AND (metadata ->> ? < (?))");
//! ```

pub mod columns;
mod compiler;
mod condition;
mod error;
mod operators;
mod parser;
mod path;
mod types;

pub use columns::{ColumnType, SchemaAllowlist};
pub use compiler::{compile, compile_filter, compile_filter_with_limits, compile_nodes};
pub use condition::setup_condition;
pub use error::FilterError;
pub use operators::{Modifier, is_operator, operator};
pub use parser::{FilterLimits, MAX_FILTER_JSON_SIZE, parse_filter, parse_filter_with_limits};
pub use path::{JSON_KEEP, JSON_TEXT, Prefix, build_prefix};
pub use types::{
    Association, AttributePath, CompiledPredicate, Condition, Filter, FilterNode, Param, Scalar,
    SqlParams,
};

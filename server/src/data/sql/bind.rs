//! Predicate binding
//!
//! Rewrites the `?` placeholders of a compiled predicate into the target
//! dialect and flattens list parameters into one bind per element. JSON paths
//! are handed to the dialect whole, and binds compared against a typed bare
//! column get that column's type.

use std::slice;

use serde::Serialize;

use super::SqlDialect;
use crate::data::entity::Entity;
use crate::data::error::DataError;
use crate::data::filters::{
    ColumnType, CompiledPredicate, JSON_KEEP, JSON_TEXT, Param, SchemaAllowlist,
};

/// Operators and connectives the compiler emits as bare words
const KEYWORDS: [&str; 4] = ["AND", "OR", "LIKE", "IN"];

/// Statement text ready for the driver plus its binds in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundQuery {
    pub sql: String,
    pub binds: Vec<String>,
}

/// Bind a compiled predicate for `dialect`, treating every column as text
///
/// A list of n values expands to n placeholders. An empty list renders as
/// `NULL` so `IN (NULL)` matches nothing.
pub fn bind_predicate(
    dialect: &dyn SqlDialect,
    predicate: &CompiledPredicate,
) -> Result<BoundQuery, DataError> {
    bind_predicate_for(dialect, predicate, &SchemaAllowlist::default())
}

/// Bind a compiled predicate using the column types of `columns`
pub fn bind_predicate_for(
    dialect: &dyn SqlDialect,
    predicate: &CompiledPredicate,
    columns: &SchemaAllowlist,
) -> Result<BoundQuery, DataError> {
    let expected = predicate.placeholder_count();
    let params = predicate.parameters();
    if expected != params.len() {
        return Err(DataError::InvalidPredicate(format!(
            "{} placeholders but {} parameters",
            expected,
            params.len()
        )));
    }

    let text = predicate.text();
    let mut binder = Binder {
        dialect,
        params: params.iter(),
        binds: Vec::with_capacity(params.len()),
    };
    let mut sql = String::with_capacity(text.len() + params.len() * 2);
    // type of the bare column whose right-hand side is still to come
    let mut pending: Option<ColumnType> = None;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == '?' {
            let ty = pending.take().unwrap_or_default();
            sql.push_str(&binder.take(ty)?);
            rest = &rest[1..];
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let word = &rest[..end];
            rest = &rest[end..];

            if let Some((hops, len)) = json_path_tail(rest) {
                let mut path = word.to_string();
                for _ in 0..hops {
                    path.push_str(&format!(" {} {}", JSON_KEEP, binder.take(ColumnType::Text)?));
                }
                path.push_str(&format!(" {} {}", JSON_TEXT, binder.take(ColumnType::Text)?));
                sql.push_str(&dialect.json_text(&path));
                rest = &rest[len..];
                pending = None;
                continue;
            }

            match word {
                // LIKE patterns are text whatever the column
                "LIKE" => pending = None,
                w if KEYWORDS.contains(&w) => {}
                column => pending = Some(columns.column_type(column)),
            }
            sql.push_str(word);
        } else {
            sql.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    let binds = binder.binds;
    tracing::trace!(dialect = dialect.name(), binds = binds.len(), "Bound predicate");
    Ok(BoundQuery { sql, binds })
}

/// Hop count and byte length of a ` -> ? .. ->> ?` tail at the start of `rest`
fn json_path_tail(rest: &str) -> Option<(usize, usize)> {
    let keep = format!(" {} ?", JSON_KEEP);
    let text = format!(" {} ?", JSON_TEXT);
    let mut hops = 0;
    let mut offset = 0;
    loop {
        let tail = &rest[offset..];
        if tail.starts_with(&text) {
            return Some((hops, offset + text.len()));
        }
        if !tail.starts_with(&keep) {
            return None;
        }
        hops += 1;
        offset += keep.len();
    }
}

/// Hands out placeholders while collecting binds in statement order
struct Binder<'a> {
    dialect: &'a dyn SqlDialect,
    params: slice::Iter<'a, Param>,
    binds: Vec<String>,
}

impl Binder<'_> {
    fn take(&mut self, ty: ColumnType) -> Result<String, DataError> {
        let Some(param) = self.params.next() else {
            return Err(DataError::InvalidPredicate(
                "ran out of parameters while binding".to_string(),
            ));
        };
        let rendered = match param {
            Param::Text(value) => self.push(value, ty),
            Param::List(values) if values.is_empty() => "NULL".to_string(),
            Param::List(values) => {
                let mut placeholders = Vec::with_capacity(values.len());
                for value in values {
                    placeholders.push(self.push(value, ty));
                }
                placeholders.join(", ")
            }
        };
        Ok(rendered)
    }

    fn push(&mut self, value: &str, ty: ColumnType) -> String {
        self.binds.push(value.to_string());
        self.dialect.typed_placeholder(self.binds.len(), ty)
    }
}

/// `SELECT id FROM <table> WHERE <predicate> ORDER BY id`
pub fn search_query(
    dialect: &dyn SqlDialect,
    entity: Entity,
    predicate: &CompiledPredicate,
) -> Result<BoundQuery, DataError> {
    let bound = bind_predicate_for(dialect, predicate, &entity.allowlist())?;
    Ok(BoundQuery {
        sql: format!(
            "SELECT id FROM {} WHERE {} ORDER BY id",
            entity.table(),
            bound.sql
        ),
        binds: bound.binds,
    })
}

//! Filter parsing
//!
//! Decodes the raw JSON filter, validates field names against the allowlist
//! and builds the typed filter tree.

use serde_json::{Map, Value};

use super::columns::SchemaAllowlist;
use super::error::FilterError;
use super::operators::Modifier;
use super::types::{Association, Condition, Filter, FilterNode, Scalar};

/// Maximum size of filter JSON in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Input limits applied before decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLimits {
    pub max_json_bytes: usize,
}

impl Default for FilterLimits {
    fn default() -> Self {
        Self {
            max_json_bytes: MAX_FILTER_JSON_SIZE,
        }
    }
}

/// Where a key sits: table columns, or keys inside a JSON column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Columns,
    Json,
}

/// Parse a filter with the default limits
pub fn parse_filter(raw: &str, allowlist: &SchemaAllowlist) -> Result<Filter, FilterError> {
    parse_filter_with_limits(raw, allowlist, &FilterLimits::default())
}

/// Parse a filter from its JSON text
///
/// Unknown fields are collected across the top level and any `$and`/`$or`
/// groups there, then reported in one error.
pub fn parse_filter_with_limits(
    raw: &str,
    allowlist: &SchemaAllowlist,
    limits: &FilterLimits,
) -> Result<Filter, FilterError> {
    if raw.len() > limits.max_json_bytes {
        return Err(FilterError::TooLarge {
            limit: limits.max_json_bytes,
        });
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| FilterError::MalformedInput(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(FilterError::MalformedInput(
            "filter must be a JSON object".to_string(),
        ));
    };

    if map.is_empty() {
        return Err(FilterError::EmptyFilter);
    }

    let mut invalid = Vec::new();
    collect_invalid_fields(&map, allowlist, &mut invalid);
    if !invalid.is_empty() {
        tracing::debug!(fields = ?invalid, "Rejected filter fields");
        return Err(FilterError::invalid_fields(&invalid));
    }

    let nodes = parse_map(&map, Scope::Columns, allowlist)?;
    let filter = Filter::new(nodes)?;
    tracing::trace!(nodes = filter.nodes().len(), "Parsed filter");
    Ok(filter)
}

fn collect_invalid_fields(
    map: &Map<String, Value>,
    allowlist: &SchemaAllowlist,
    invalid: &mut Vec<String>,
) {
    for (key, value) in map {
        if Association::from_keyword(key).is_some() {
            if let Value::Object(inner) = value {
                collect_invalid_fields(inner, allowlist, invalid);
            }
        } else if !allowlist.contains(key) && !invalid.contains(key) {
            invalid.push(key.clone());
        }
    }
}

fn parse_map(
    map: &Map<String, Value>,
    scope: Scope,
    allowlist: &SchemaAllowlist,
) -> Result<Vec<FilterNode>, FilterError> {
    let mut nodes = Vec::with_capacity(map.len());
    for (key, value) in map {
        nodes.extend(parse_entry(key, value, scope, allowlist)?);
    }
    Ok(nodes)
}

/// One `key: value` entry; a modifier map yields one node per modifier
fn parse_entry(
    key: &str,
    value: &Value,
    scope: Scope,
    allowlist: &SchemaAllowlist,
) -> Result<Vec<FilterNode>, FilterError> {
    if let Some(op) = Association::from_keyword(key) {
        let Value::Object(inner) = value else {
            return Err(FilterError::invalid(format!(
                "When using '{}', you should specify an object with expressions to be filtered",
                op.keyword()
            )));
        };
        if inner.is_empty() {
            return Err(FilterError::invalid(format!(
                "'{}' requires at least one expression",
                op.keyword()
            )));
        }
        let children = parse_map(inner, scope, allowlist)?;
        return Ok(vec![FilterNode::Association { op, children }]);
    }

    match value {
        Value::String(_) | Value::Number(_) => {
            let value = Scalar::from_json(value).ok_or_else(|| unsupported_value(key, value))?;
            Ok(vec![FilterNode::Equality {
                field: key.to_string(),
                value,
            }])
        }
        Value::Object(modifiers) => {
            if modifiers.is_empty() {
                return Err(FilterError::invalid(format!(
                    "No conditions given for '{}'",
                    key
                )));
            }
            let mut nodes = Vec::with_capacity(modifiers.len());
            for (modifier, condition) in modifiers {
                if let Some(modifier) = Modifier::from_token(modifier) {
                    nodes.push(FilterNode::Range {
                        field: key.to_string(),
                        modifier,
                        condition: Condition::from_json(condition)?,
                    });
                    continue;
                }

                let child_scope = match scope {
                    Scope::Json => Scope::Json,
                    Scope::Columns if allowlist.is_json(key) => Scope::Json,
                    Scope::Columns => return Err(FilterError::unknown_operator(modifier)),
                };
                nodes.push(FilterNode::Path {
                    field: key.to_string(),
                    children: parse_entry(modifier, condition, child_scope, allowlist)?,
                });
            }
            Ok(nodes)
        }
        Value::Array(_) => Err(FilterError::invalid(format!(
            "Arrays are only supported as the condition of 'in' (field '{}')",
            key
        ))),
        Value::Bool(_) | Value::Null => Err(unsupported_value(key, value)),
    }
}

fn unsupported_value(key: &str, value: &Value) -> FilterError {
    FilterError::invalid(format!("Unsupported value for '{}': {}", key, value))
}

//! Attribute path resolution
//!
//! Turns a parent path and a terminal key into the left-hand side of a
//! comparison. A root-level key is a bare column. Anything deeper walks into a
//! JSON column: intermediate keys use `->` (result stays JSON) and the last key
//! uses `->>` (result extracted as text).
//!
//! The column name is embedded as an identifier; every JSON key is bound.

use super::types::AttributePath;

/// JSON traversal keeping the JSON type
pub const JSON_KEEP: &str = "->";
/// JSON traversal extracting text
pub const JSON_TEXT: &str = "->>";

/// Left-hand side expression and the parameters its placeholders consume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub expr: String,
    pub params: Vec<String>,
}

/// Build the attribute expression for `key` under `base`
///
/// Parameters come out as `base[1..]` followed by `key`, matching the
/// placeholder order of `expr`.
pub fn build_prefix(base: &AttributePath, key: &str) -> Prefix {
    let Some((column, keys)) = base.segments().split_first() else {
        return Prefix {
            expr: key.to_string(),
            params: Vec::new(),
        };
    };

    let mut expr = column.clone();
    for _ in keys {
        expr.push_str(&format!(" {} ?", JSON_KEEP));
    }
    expr.push_str(&format!(" {} ?", JSON_TEXT));

    let mut params = keys.to_vec();
    params.push(key.to_string());

    Prefix { expr, params }
}

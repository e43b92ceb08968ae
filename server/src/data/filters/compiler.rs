//! Filter compiler
//!
//! Walks a parsed [`Filter`] and emits predicate text with `?` placeholders
//! plus the parameters in placeholder order.
//!
//! Siblings are joined by the connective of the enclosing group (`AND` at the
//! top level). `$and`/`$or` groups and nested JSON-path groups are always
//! parenthesized so precedence holds at any depth.

use super::columns::SchemaAllowlist;
use super::condition::setup_condition;
use super::error::FilterError;
use super::parser::{FilterLimits, parse_filter, parse_filter_with_limits};
use super::path::build_prefix;
use super::types::{
    Association, AttributePath, CompiledPredicate, Filter, FilterNode, Param, SqlParams,
};

/// Compile a parsed filter
pub fn compile(filter: &Filter) -> Result<CompiledPredicate, FilterError> {
    let mut params = SqlParams::default();
    let text = compile_nodes(
        filter.nodes(),
        &AttributePath::root(),
        Association::And,
        &mut params,
    )?;

    let predicate = CompiledPredicate::new(text, params.values);
    tracing::trace!(
        nodes = filter.nodes().len(),
        params = predicate.parameters().len(),
        "Compiled filter"
    );
    Ok(predicate)
}

/// Parse and compile in one step
pub fn compile_filter(
    raw: &str,
    allowlist: &SchemaAllowlist,
) -> Result<CompiledPredicate, FilterError> {
    compile(&parse_filter(raw, allowlist)?)
}

/// Parse and compile with explicit input limits
pub fn compile_filter_with_limits(
    raw: &str,
    allowlist: &SchemaAllowlist,
    limits: &FilterLimits,
) -> Result<CompiledPredicate, FilterError> {
    compile(&parse_filter_with_limits(raw, allowlist, limits)?)
}

/// Compile sibling nodes under `base`, joined by `assoc`
pub fn compile_nodes(
    nodes: &[FilterNode],
    base: &AttributePath,
    assoc: Association,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    let mut text = String::new();
    for (index, node) in nodes.iter().enumerate() {
        if index > 0 {
            text.push(' ');
            text.push_str(assoc.connective());
            text.push(' ');
        }

        let fragment = match node {
            FilterNode::Equality { field, value } => {
                emit_leaf(base, field, "=", "?", Param::Text(value.to_string()), params)
            }
            FilterNode::Range {
                field,
                modifier,
                condition,
            } => {
                let value = setup_condition(*modifier, condition)?;
                emit_leaf(base, field, modifier.symbol(), "(?)", value, params)
            }
            FilterNode::Path { field, children } => {
                compile_path(field, children, base, assoc, params)?
            }
            FilterNode::Association { op, children } => {
                compile_association(*op, children, base, params)?
            }
        };
        text.push_str(&fragment);
    }
    Ok(text)
}

/// `$and` / `$or` group: same path, new connective
fn compile_association(
    op: Association,
    children: &[FilterNode],
    base: &AttributePath,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    let inner = compile_nodes(children, base, op, params)?;
    Ok(format!("({})", inner))
}

/// Nested attribute group: one JSON level deeper, same connective
fn compile_path(
    field: &str,
    children: &[FilterNode],
    base: &AttributePath,
    assoc: Association,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    let inner = compile_nodes(children, &base.child(field), assoc, params)?;
    Ok(format!("({})", inner))
}

/// `<prefix> <operator> <placeholder>`; path params first, then the value
fn emit_leaf(
    base: &AttributePath,
    field: &str,
    operator: &str,
    placeholder: &str,
    value: Param,
    params: &mut SqlParams,
) -> String {
    let prefix = build_prefix(base, field);
    for key in prefix.params {
        params.push_text(key);
    }
    params.push(value);
    format!("{} {} {}", prefix.expr, operator, placeholder)
}

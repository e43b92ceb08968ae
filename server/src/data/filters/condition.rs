//! Condition coercion
//!
//! Shapes a raw condition into the parameter a modifier expects.

use serde_json::Value;

use super::error::FilterError;
use super::operators::Modifier;
use super::types::{Condition, Param};

/// Coerce `condition` for use with `modifier`
///
/// - `like` wraps the stringified scalar as `%value%`
/// - `in` requires a list of strings and keeps it as one list parameter
/// - ordering modifiers stringify the scalar
pub fn setup_condition(modifier: Modifier, condition: &Condition) -> Result<Param, FilterError> {
    match (modifier, condition) {
        (Modifier::In, Condition::List(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => values.push(s.clone()),
                    _ => {
                        return Err(FilterError::invalid(
                            "All elements inside the array for 'in' condition must be strings",
                        ));
                    }
                }
            }
            Ok(Param::List(values))
        }
        (Modifier::In, _) => Err(FilterError::invalid(
            "Please use an array with all possible values for 'in' condition",
        )),
        (Modifier::Like, Condition::Scalar(scalar)) => Ok(Param::Text(format!("%{}%", scalar))),
        (m, Condition::Scalar(scalar)) if m.is_ordering() => Ok(Param::Text(scalar.to_string())),
        (m, Condition::List(_)) => Err(type_mismatch(m, "an array")),
        (m, Condition::Map(_)) => Err(type_mismatch(m, "an object")),
        (m, Condition::Scalar(_)) => Err(type_mismatch(m, "a scalar")),
    }
}

fn type_mismatch(modifier: Modifier, kind: &str) -> FilterError {
    FilterError::invalid(format!(
        "Type mismatch: you can't use '{}' to compare {} value",
        modifier.token(),
        kind
    ))
}

//! Filter type definitions
//!
//! The typed filter tree produced by the parser and the compiled predicate
//! handed to the query layer.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::error::FilterError;
use super::operators::Modifier;

/// Literal compared with `=`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Text(String),
    Number(Number),
}

impl Scalar {
    /// Strings and numbers are scalars; everything else is not
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Right-hand side of a modifier, kept in its raw shape until coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Scalar(Scalar),
    List(Vec<Value>),
    Map(Map<String, Value>),
}

impl Condition {
    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        match value {
            Value::String(s) => Ok(Self::Scalar(Scalar::Text(s.clone()))),
            Value::Number(n) => Ok(Self::Scalar(Scalar::Number(n.clone()))),
            Value::Array(items) => Ok(Self::List(items.clone())),
            Value::Object(map) => Ok(Self::Map(map.clone())),
            Value::Bool(_) | Value::Null => Err(FilterError::invalid(format!(
                "Unsupported condition value: {}",
                value
            ))),
        }
    }
}

/// Logical connective for `$and` / `$or` groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Association {
    And,
    Or,
}

impl Association {
    /// Recognise a `$and` / `$or` key (case-insensitive)
    pub fn from_keyword(key: &str) -> Option<Self> {
        if key.eq_ignore_ascii_case("$and") {
            Some(Self::And)
        } else if key.eq_ignore_ascii_case("$or") {
            Some(Self::Or)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "$and",
            Self::Or => "$or",
        }
    }

    /// SQL connective joining sibling expressions
    pub fn connective(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl FromStr for Association {
    type Err = FilterError;

    /// Accepts `AND`/`OR` with or without the `$` prefix, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix('$').unwrap_or(s);
        if bare.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if bare.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(FilterError::invalid(format!(
                "Invalid association operator ({}). Valid ones are: OR, AND",
                s
            )))
        }
    }
}

/// One node of a parsed filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterNode {
    /// `field = literal`
    Equality { field: String, value: Scalar },
    /// `field <operator> (condition)`
    Range {
        field: String,
        modifier: Modifier,
        condition: Condition,
    },
    /// Children evaluated one JSON level below `field`
    Path {
        field: String,
        children: Vec<FilterNode>,
    },
    /// Parenthesized group joined by `op`
    Association {
        op: Association,
        children: Vec<FilterNode>,
    },
}

/// A validated filter: the ordered top-level nodes (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    nodes: Vec<FilterNode>,
}

impl Filter {
    pub fn new(nodes: Vec<FilterNode>) -> Result<Self, FilterError> {
        if nodes.is_empty() {
            return Err(FilterError::EmptyFilter);
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[FilterNode] {
        &self.nodes
    }

}

/// Column name followed by nested JSON keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath {
    segments: Vec<String>,
}

impl AttributePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// New path with `segment` appended
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// Bound parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
    Text(String),
    /// Only produced by `in` conditions
    List(Vec<String>),
}

/// Collects parameters during compilation (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<Param>,
}

impl SqlParams {
    pub fn push(&mut self, param: Param) {
        self.values.push(param);
    }

    pub fn push_text(&mut self, value: impl Into<String>) {
        self.values.push(Param::Text(value.into()));
    }
}

/// Predicate text with `?` placeholders and its parameters in placeholder order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledPredicate {
    text: String,
    parameters: Vec<Param>,
}

impl CompiledPredicate {
    pub fn new(text: impl Into<String>, parameters: Vec<Param>) -> Self {
        Self {
            text: text.into(),
            parameters,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &[Param] {
        &self.parameters
    }

    /// Number of `?` placeholders in the text
    pub fn placeholder_count(&self) -> usize {
        self.text.matches('?').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_display_keeps_json_number_form() {
        assert_eq!(Scalar::from_json(&json!(5)).unwrap().to_string(), "5");
        assert_eq!(Scalar::from_json(&json!(2.25)).unwrap().to_string(), "2.25");
        assert_eq!(Scalar::from_json(&json!(-3)).unwrap().to_string(), "-3");
        assert_eq!(
            Scalar::from_json(&json!("ACTIVE")).unwrap().to_string(),
            "ACTIVE"
        );
        assert!(Scalar::from_json(&json!(true)).is_none());
        assert!(Scalar::from_json(&json!(["a"])).is_none());
    }

    #[test]
    fn condition_shapes() {
        assert_eq!(
            Condition::from_json(&json!("x")).unwrap(),
            Condition::Scalar(Scalar::Text("x".into()))
        );
        assert_eq!(
            Condition::from_json(&json!(["a", 1])).unwrap(),
            Condition::List(vec![json!("a"), json!(1)])
        );
        assert!(matches!(
            Condition::from_json(&json!({"a": 1})).unwrap(),
            Condition::Map(_)
        ));
        assert!(Condition::from_json(&json!(null)).is_err());
        assert!(Condition::from_json(&json!(false)).is_err());
    }

    #[test]
    fn association_keywords_are_case_insensitive() {
        assert_eq!(Association::from_keyword("$or"), Some(Association::Or));
        assert_eq!(Association::from_keyword("$OR"), Some(Association::Or));
        assert_eq!(Association::from_keyword("$And"), Some(Association::And));
        assert_eq!(Association::from_keyword("or"), None);
        assert_eq!(Association::from_keyword("$xor"), None);
    }

    #[test]
    fn association_from_str() {
        assert_eq!("OR".parse::<Association>().unwrap(), Association::Or);
        assert_eq!("$and".parse::<Association>().unwrap(), Association::And);
        for token in ["ANDA", "$XOR", "ORAND", ""] {
            let err = token.parse::<Association>().unwrap_err();
            assert_eq!(err.code(), "INVALID_FILTER");
        }
    }

    #[test]
    fn filter_rejects_empty_node_list() {
        assert_eq!(Filter::new(Vec::new()), Err(FilterError::EmptyFilter));
    }

    #[test]
    fn attribute_path_child_does_not_mutate_parent() {
        let root = AttributePath::root();
        let metadata = root.child("metadata");
        let price = metadata.child("price");

        assert!(root.segments().is_empty());
        assert_eq!(metadata.segments(), ["metadata"]);
        assert_eq!(price.segments(), ["metadata", "price"]);
    }

    #[test]
    fn predicate_serializes_list_params_inline() {
        let predicate = CompiledPredicate::new(
            "status IN (?) AND name = ?",
            vec![
                Param::List(vec!["A".into(), "B".into()]),
                Param::Text("x".into()),
            ],
        );
        assert_eq!(predicate.placeholder_count(), 2);
        assert_eq!(
            serde_json::to_value(&predicate).unwrap(),
            json!({"text": "status IN (?) AND name = ?", "parameters": [["A", "B"], "x"]})
        );
    }
}

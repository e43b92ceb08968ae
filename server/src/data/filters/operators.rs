//! Modifier registry
//!
//! Maps the modifier tokens accepted in filters (`gt`, `lt`, `geq`, `leq`,
//! `like`, `in`) to their SQL operator symbols. The table is a constant; there
//! is nothing to initialise at runtime.

use super::error::FilterError;

/// Comparison or containment modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Gt,
    Lt,
    Geq,
    Leq,
    Like,
    In,
}

/// token, modifier, operator symbol; row order follows the `Modifier` discriminants
const OPERATORS: [(&str, Modifier, &str); 6] = [
    ("gt", Modifier::Gt, ">"),
    ("lt", Modifier::Lt, "<"),
    ("geq", Modifier::Geq, ">="),
    ("leq", Modifier::Leq, "<="),
    ("like", Modifier::Like, "LIKE"),
    ("in", Modifier::In, "IN"),
];

impl Modifier {
    /// Look up a modifier by its filter token (case-sensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(t, _, _)| *t == token)
            .map(|(_, modifier, _)| *modifier)
    }

    pub fn token(self) -> &'static str {
        OPERATORS[self as usize].0
    }

    /// SQL operator emitted for this modifier
    pub fn symbol(self) -> &'static str {
        OPERATORS[self as usize].2
    }

    /// `gt`, `lt`, `geq` and `leq`
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Geq | Self::Leq)
    }
}

/// Operator symbol for a modifier token
pub fn operator(token: &str) -> Result<&'static str, FilterError> {
    Modifier::from_token(token)
        .map(Modifier::symbol)
        .ok_or_else(|| FilterError::unknown_operator(token))
}

/// Whether `token` names a modifier
pub fn is_operator(token: &str) -> bool {
    Modifier::from_token(token).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_returns_symbol() {
        assert_eq!(operator("gt").unwrap(), ">");
        assert_eq!(operator("lt").unwrap(), "<");
        assert_eq!(operator("geq").unwrap(), ">=");
        assert_eq!(operator("leq").unwrap(), "<=");
        assert_eq!(operator("like").unwrap(), "LIKE");
        assert_eq!(operator("in").unwrap(), "IN");
    }

    #[test]
    fn operator_rejects_unknown_tokens() {
        for token in ["yoyo", "yolo", "likeing", "less", "great", "GT", ""] {
            let err = operator(token).unwrap_err();
            assert_eq!(err, FilterError::unknown_operator(token));
        }
    }

    #[test]
    fn is_operator_lookup() {
        assert!(is_operator("in"));
        assert!(is_operator("leq"));
        assert!(!is_operator("price"));
        assert!(!is_operator("In"));
    }

    #[test]
    fn table_and_enum_agree() {
        for (row, (token, modifier, symbol)) in OPERATORS.into_iter().enumerate() {
            assert_eq!(modifier as usize, row);
            assert_eq!(Modifier::from_token(token), Some(modifier));
            assert_eq!(modifier.token(), token);
            assert_eq!(modifier.symbol(), symbol);
        }
    }

    #[test]
    fn ordering_modifiers() {
        assert!(Modifier::Gt.is_ordering());
        assert!(Modifier::Leq.is_ordering());
        assert!(!Modifier::Like.is_ordering());
        assert!(!Modifier::In.is_ordering());
    }
}

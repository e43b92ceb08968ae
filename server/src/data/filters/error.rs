//! Filter error types

use thiserror::Error;

/// Errors raised while parsing or compiling a filter
///
/// Every variant is reported synchronously; compilation never yields a
/// partial predicate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The raw filter could not be decoded into a JSON object
    #[error("Malformed filter: {0}")]
    MalformedInput(String),

    /// The raw filter is larger than the configured limit
    #[error("Filter exceeds maximum size of {limit} bytes")]
    TooLarge { limit: usize },

    /// The filter object has no entries
    #[error("No parameters to filter given")]
    EmptyFilter,

    /// Unknown fields, wrong payload shapes or condition type mismatches
    #[error("{0}")]
    InvalidFilter(String),

    /// A modifier that is not an operator was used as a comparator
    #[error("'{token}' is not included in the valid modifiers (gt, lt, geq, leq, like, in)")]
    UnknownOperator { token: String },
}

impl FilterError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidFilter(message.into())
    }

    /// Batched error naming every rejected field at once
    pub fn invalid_fields(fields: &[String]) -> Self {
        Self::InvalidFilter(format!(
            "The following filter parameters are not valid: ({})",
            fields.join(", ")
        ))
    }

    pub fn unknown_operator(token: impl Into<String>) -> Self {
        Self::UnknownOperator {
            token: token.into(),
        }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "MALFORMED_FILTER",
            Self::TooLarge { .. } => "FILTER_TOO_LARGE",
            Self::EmptyFilter => "EMPTY_FILTER",
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::UnknownOperator { .. } => "UNKNOWN_OPERATOR",
        }
    }
}

use thiserror::Error;

/// Validation failure raised by an [`EmbedBuilder`](super::EmbedBuilder) setter
///
/// Each variant names the kind of constraint that was violated so callers can
/// tell a wrong argument type from an out-of-range value or a malformed string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    #[error("Expected type '{expected}', received type '{found}'")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{what} cannot exceed {limit} (got {actual})")]
    RangeViolation {
        what: &'static str,
        limit: u64,
        actual: u64,
    },

    #[error("{what} is not well formed: {value:?}")]
    FormatViolation { what: &'static str, value: String },

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
}

impl EmbedError {
    pub(crate) fn type_mismatch(expected: &'static str, found: &serde_json::Value) -> Self {
        EmbedError::TypeMismatch {
            expected,
            found: json_type_name(found),
        }
    }
}

/// Name of a JSON value's type, as reported in [`EmbedError::TypeMismatch`]
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Errors raised while constructing or converting values.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("field {field} missing for bean {bean}")]
    MissingField { bean: String, field: String },
    #[error("field {field} is not declared by bean {bean}")]
    UnknownField { bean: String, field: String },
    #[error("option {option} is not declared by union {union}")]
    UnknownOption { union: String, option: String },
    #[error("unresolved type reference: {0}")]
    UnresolvedReference(String),
    #[error("expected {expected} but found {actual}")]
    Conversion {
        expected: &'static str,
        actual: &'static str,
    },
}

impl ValueError {
    pub(crate) fn conversion(expected: &'static str, actual: &crate::ConjureValue) -> Self {
        Self::Conversion {
            expected,
            actual: actual.kind(),
        }
    }
}

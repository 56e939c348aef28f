//! Decoder and encoder error types.

use conjure_types::ValueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The JSON value has the wrong shape for the expected type.
    #[error("expected to find {expected} type but found {actual} instead")]
    TypeMismatch {
        expected: String,
        actual: &'static str,
    },
    /// A required field is absent or null. `object` is the offending input.
    #[error("field {field} not found in object {object}")]
    MissingField { field: String, object: String },
    /// The union discriminator names no declared option.
    #[error("unknown union type {variant} for {union}")]
    UnknownVariant { variant: String, union: String },
    /// A key of a non-string-keyed map that does not parse as JSON.
    #[error("map key {key:?} is not valid JSON")]
    InvalidKey {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// Malformed JSON text.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Value(#[from] ValueError),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    /// Structured values cannot be flattened into a header, path or query
    /// string.
    #[error("cannot plain-encode a value of type {kind}")]
    PlainEncodeUnsupported { kind: String },
}

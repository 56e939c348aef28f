//! Wire encoding for Conjure values.
//!
//! [`ConjureDecoder`] walks a [`TypeDescriptor`](conjure_types::TypeDescriptor)
//! to turn parsed JSON into a [`ConjureValue`](conjure_types::ConjureValue).
//! [`ConjureEncoder`] goes the other way, inferring the shape from the value
//! itself, and also produces the flat "plain" strings used for headers, path
//! segments and query parameters.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod plain;

pub use decoder::{ConjureDecoder, DecoderOptions};
pub use encoder::{ConjureEncoder, JsonBody};
pub use error::{DecodeError, EncodeError};
pub use plain::PlainValue;

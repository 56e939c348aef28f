//! Type descriptors and the value model for Conjure generated clients.
//!
//! A [`TypeDescriptor`] is a passive description of how a value travels on
//! the wire: containers (list, set, map, optional), binary payloads,
//! primitives, and the structured types declared by a schema (beans, unions
//! and enums). Structured types carry their shape in a shared, read-only
//! [`FieldMap`] which both the decoder and the encoder consult.
//!
//! Decoded values are represented by [`ConjureValue`]; generated Rust types
//! convert to and from it through [`FromConjureValue`] and
//! [`IntoConjureValue`].

pub mod convert;
pub mod error;
pub mod type_def;
pub mod value;

pub use convert::{ConjureType, FromConjureValue, IntoConjureValue};
pub use error::ValueError;
pub use type_def::{
    BeanDefinition, EnumDefinition, EnumMember, FieldDefinition, FieldMap, PrimitiveKind,
    TypeBuilder, TypeDescriptor, TypeRegistry, UnionDefinition, UNKNOWN,
};
pub use value::{BeanValue, ConjureValue, EnumValue, UnionValue};

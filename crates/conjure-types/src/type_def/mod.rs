//! Type descriptors.
//!
//! The closed set of wire shapes is modelled as the [`TypeDescriptor`] sum
//! type. Structured types (beans, unions, enums) are carried by their shared
//! definitions, so deciding "is this a bean" is a pattern match rather than
//! an inspection of the value at decode time.

pub mod builder;
pub mod classes;
pub mod field;
pub mod registry;

use std::fmt;
use std::sync::Arc;

pub use builder::TypeBuilder;
pub use classes::{BeanDefinition, EnumDefinition, EnumMember, UnionDefinition, UNKNOWN};
pub use field::{FieldDefinition, FieldMap};
pub use registry::TypeRegistry;

use crate::value::ConjureValue;

/// JSON scalar kinds validated structurally by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Double,
    String,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

/// Describes how a value is decoded from and encoded to the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Any JSON value, passed through untouched.
    Any,
    Primitive(PrimitiveKind),
    /// Opaque bytes. Base64 text in plain contexts.
    Binary,
    List(Box<TypeDescriptor>),
    Set(Box<TypeDescriptor>),
    /// Key type first, value type second.
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    Optional(Box<TypeDescriptor>),
    Bean(Arc<BeanDefinition>),
    Union(Arc<UnionDefinition>),
    Enum(Arc<EnumDefinition>),
    /// A named type looked up in a [`TypeRegistry`]; used for aliases and
    /// recursive types.
    Ref(String),
}

impl TypeDescriptor {
    /// Short name of the descriptor variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Primitive(kind) => kind.name(),
            Self::Binary => "binary",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_, _) => "map",
            Self::Optional(_) => "optional",
            Self::Bean(_) => "bean",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::Ref(_) => "ref",
        }
    }

    /// Name of the declared type for beans, unions, enums and references.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Bean(def) => Some(def.name()),
            Self::Union(def) => Some(def.name()),
            Self::Enum(def) => Some(def.name()),
            Self::Ref(name) => Some(name),
            _ => None,
        }
    }

    /// The value an omitted or `null` field of this type decodes to.
    ///
    /// Collections default to empty and optionals to `Null`; every other
    /// type is required and has no default.
    pub fn empty_value(&self) -> Option<ConjureValue> {
        match self {
            Self::List(_) => Some(ConjureValue::List(Vec::new())),
            Self::Set(_) => Some(ConjureValue::Set(Default::default())),
            Self::Map(_, _) => Some(ConjureValue::Map(Default::default())),
            Self::Optional(_) => Some(ConjureValue::Null),
            _ => None,
        }
    }

    /// Whether map keys of this type are kept as the raw key string instead
    /// of being parsed as JSON first.
    pub fn is_string_keyed(&self) -> bool {
        matches!(
            self,
            Self::Primitive(PrimitiveKind::String) | Self::Enum(_) | Self::Binary
        )
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(item) => write!(f, "list<{item}>"),
            Self::Set(item) => write!(f, "set<{item}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Optional(item) => write!(f, "optional<{item}>"),
            _ => match self.type_name() {
                Some(name) => f.write_str(name),
                None => f.write_str(self.kind()),
            },
        }
    }
}

//! Shorthand constructors for [`TypeDescriptor`] values.

use std::sync::Arc;

use super::classes::{BeanDefinition, EnumDefinition, UnionDefinition};
use super::{PrimitiveKind, TypeDescriptor};

/// Factory for constructing descriptors.
///
/// Scalar shorthands are lowercase; constructors taking nested types are
/// capitalized after the wire shape they produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBuilder;

#[allow(non_snake_case)]
impl TypeBuilder {
    pub fn new() -> Self {
        Self
    }

    // ------------------------------------------------------------------
    // Shorthand getters

    pub fn any(&self) -> TypeDescriptor {
        TypeDescriptor::Any
    }

    pub fn bool(&self) -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Boolean)
    }

    pub fn int(&self) -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Integer)
    }

    pub fn double(&self) -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Double)
    }

    pub fn str(&self) -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::String)
    }

    pub fn bin(&self) -> TypeDescriptor {
        TypeDescriptor::Binary
    }

    // ------------------------------------------------------------------
    // Factory methods

    pub fn List(&self, item: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::List(Box::new(item))
    }

    pub fn Set(&self, item: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Set(Box::new(item))
    }

    pub fn Map(&self, key: TypeDescriptor, value: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Map(Box::new(key), Box::new(value))
    }

    pub fn Optional(&self, item: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Optional(Box::new(item))
    }

    pub fn Bean(&self, definition: Arc<BeanDefinition>) -> TypeDescriptor {
        TypeDescriptor::Bean(definition)
    }

    pub fn Union(&self, definition: Arc<UnionDefinition>) -> TypeDescriptor {
        TypeDescriptor::Union(definition)
    }

    pub fn Enum(&self, definition: Arc<EnumDefinition>) -> TypeDescriptor {
        TypeDescriptor::Enum(definition)
    }

    pub fn Ref(&self, name: impl Into<String>) -> TypeDescriptor {
        TypeDescriptor::Ref(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> TypeBuilder {
        TypeBuilder::new()
    }

    #[test]
    fn containers_box_their_items() {
        assert_eq!(
            t().List(t().str()),
            TypeDescriptor::List(Box::new(TypeDescriptor::Primitive(PrimitiveKind::String)))
        );
        match t().Map(t().int(), t().bool()) {
            TypeDescriptor::Map(key, value) => {
                assert_eq!(*key, t().int());
                assert_eq!(*value, t().bool());
            }
            other => panic!("expected map, got {other}"),
        }
    }

    #[test]
    fn structured_types_share_definitions() {
        let def = Arc::new(BeanDefinition::new("Empty", []));
        let TypeDescriptor::Bean(inner) = t().Bean(Arc::clone(&def)) else {
            panic!("expected bean");
        };
        assert!(Arc::ptr_eq(&inner, &def));
    }
}

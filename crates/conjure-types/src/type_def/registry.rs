//! A namespace of named types.
//!
//! `Ref` descriptors are resolved through a registry. That is how aliases
//! are expressed and how a bean can refer back to itself.

use std::collections::HashMap;
use std::sync::Arc;

use super::classes::{BeanDefinition, EnumDefinition, UnionDefinition};
use super::TypeDescriptor;
use crate::error::ValueError;

/// Named type table. Populated once, then shared read-only (usually behind
/// an `Arc`).
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptor` under `name`. If the name is already taken the
    /// existing entry is kept and `false` is returned.
    pub fn register(&mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> bool {
        let name = name.into();
        if self.types.contains_key(&name) {
            return false;
        }
        self.types.insert(name, descriptor);
        true
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.register(name, descriptor);
        self
    }

    pub fn with_bean(self, definition: Arc<BeanDefinition>) -> Self {
        let name = definition.name().to_string();
        self.with(name, TypeDescriptor::Bean(definition))
    }

    pub fn with_union(self, definition: Arc<UnionDefinition>) -> Self {
        let name = definition.name().to_string();
        self.with(name, TypeDescriptor::Union(definition))
    }

    pub fn with_enum(self, definition: Arc<EnumDefinition>) -> Self {
        let name = definition.name().to_string();
        self.with(name, TypeDescriptor::Enum(definition))
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Looks up `name`, following chains of references to a concrete
    /// descriptor.
    pub fn resolve(&self, name: &str) -> Result<&TypeDescriptor, ValueError> {
        let mut current = name;
        // A chain longer than the table itself must loop.
        for _ in 0..=self.types.len() {
            match self.types.get(current) {
                Some(TypeDescriptor::Ref(next)) => current = next,
                Some(descriptor) => return Ok(descriptor),
                None => break,
            }
        }
        Err(ValueError::UnresolvedReference(name.to_string()))
    }

    /// Resolves `descriptor` if it is a reference, otherwise returns it.
    pub fn resolve_descriptor<'a>(
        &'a self,
        descriptor: &'a TypeDescriptor,
    ) -> Result<&'a TypeDescriptor, ValueError> {
        match descriptor {
            TypeDescriptor::Ref(name) => self.resolve(name),
            other => Ok(other),
        }
    }
}

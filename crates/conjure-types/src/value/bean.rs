//! An immutable instance of a bean.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;

use super::ConjureValue;
use crate::error::ValueError;
use crate::type_def::{BeanDefinition, FieldDefinition};

/// One value per declared field, stored in declaration order.
#[derive(Clone)]
pub struct BeanValue {
    definition: Arc<BeanDefinition>,
    values: Vec<ConjureValue>,
}

impl BeanValue {
    /// Constructs a bean from `(internal name, value)` pairs.
    ///
    /// Every declared field must be supplied and no undeclared field may be.
    pub fn new<I, K>(definition: Arc<BeanDefinition>, fields: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = (K, ConjureValue)>,
        K: Into<String>,
    {
        let mut supplied: IndexMap<String, ConjureValue> = IndexMap::new();
        for (name, value) in fields {
            let name = name.into();
            if !definition.fields().contains(&name) {
                return Err(ValueError::UnknownField {
                    bean: definition.name().to_string(),
                    field: name,
                });
            }
            supplied.insert(name, value);
        }

        let mut values = Vec::with_capacity(definition.fields().len());
        for field in definition.fields() {
            let Some(value) = supplied.swap_remove(field.name()) else {
                return Err(ValueError::MissingField {
                    bean: definition.name().to_string(),
                    field: field.name().to_string(),
                });
            };
            values.push(value);
        }

        Ok(Self { definition, values })
    }

    pub fn definition(&self) -> &Arc<BeanDefinition> {
        &self.definition
    }

    pub fn type_name(&self) -> &str {
        self.definition.name()
    }

    /// Value of the field with internal name `name`.
    pub fn get(&self, name: &str) -> Option<&ConjureValue> {
        let index = self.definition.fields().get_index_of(name)?;
        self.values.get(index)
    }

    /// Field definitions paired with their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDefinition, &ConjureValue)> {
        self.definition.fields().iter().zip(self.values.iter())
    }

    /// Consumes the bean, yielding `(internal name, value)` pairs.
    pub fn into_fields(self) -> IndexMap<String, ConjureValue> {
        self.definition
            .fields()
            .iter()
            .map(|field| field.name().to_string())
            .zip(self.values)
            .collect()
    }
}

impl PartialEq for BeanValue {
    fn eq(&self, other: &Self) -> bool {
        self.definition.name() == other.definition.name() && self.values == other.values
    }
}

impl Eq for BeanValue {}

impl Hash for BeanValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.definition.name().hash(state);
        self.values.hash(state);
    }
}

impl fmt::Debug for BeanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.definition.name());
        for (field, value) in self.iter() {
            out.field(field.name(), value);
        }
        out.finish()
    }
}

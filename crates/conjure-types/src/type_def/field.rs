//! Field definitions and the ordered field map shared by beans and unions.

use std::borrow::Cow;
use std::ops::Index;

use indexmap::IndexMap;

use super::TypeDescriptor;

/// Pairs an internal field name with its wire identifier and type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    name: String,
    identifier: String,
    field_type: TypeDescriptor,
}

impl FieldDefinition {
    /// `name` is the identifier-safe internal name, `identifier` the key used
    /// on the wire.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        field_type: TypeDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            field_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn field_type(&self) -> &TypeDescriptor {
        &self.field_type
    }

    /// The internal name with underscores replaced by hyphens.
    pub fn hyphenated_name(&self) -> String {
        self.name.replace('_', "-")
    }

    /// Keys to look for in an incoming object, highest priority first:
    /// the internal name, the wire identifier and, when `hyphen_tolerant`
    /// is set, the hyphenated internal name.
    pub fn candidate_keys(&self, hyphen_tolerant: bool) -> Vec<Cow<'_, str>> {
        let mut keys: Vec<Cow<'_, str>> = vec![Cow::Borrowed(self.name.as_str())];
        if self.identifier != self.name {
            keys.push(Cow::Borrowed(self.identifier.as_str()));
        }
        if hyphen_tolerant {
            let hyphenated = self.hyphenated_name();
            if !keys.iter().any(|key| *key == hyphenated) {
                keys.push(Cow::Owned(hyphenated));
            }
        }
        keys
    }
}

/// Read-only, declaration-ordered mapping from internal name to
/// [`FieldDefinition`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: IndexMap<String, FieldDefinition>,
}

impl FieldMap {
    /// Builds a map in declaration order. A repeated name replaces the
    /// earlier definition in place.
    pub fn new(fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        let fields = fields
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn get_index_of(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    /// Finds the field whose wire identifier equals `identifier`.
    pub fn get_by_identifier(&self, identifier: &str) -> Option<(usize, &FieldDefinition)> {
        self.fields
            .values()
            .enumerate()
            .find(|(_, field)| field.identifier == identifier)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = &'a FieldDefinition;
    type IntoIter = indexmap::map::Values<'a, String, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

/// Panics when `index` is out of bounds.
impl Index<usize> for FieldMap {
    type Output = FieldDefinition;

    fn index(&self, index: usize) -> &FieldDefinition {
        &self.fields[index]
    }
}

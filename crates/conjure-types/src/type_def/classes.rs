//! Definitions of the structured types declared by a schema.

use super::field::{FieldDefinition, FieldMap};

/// Name of the fallback member every enum carries.
pub const UNKNOWN: &str = "UNKNOWN";

// -------------------------------------------------------------------------
// BeanDefinition

/// A record type with a fixed set of named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct BeanDefinition {
    name: String,
    fields: FieldMap,
}

impl BeanDefinition {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            fields: FieldMap::new(fields),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Internal field name to definition, in declaration order.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

// -------------------------------------------------------------------------
// UnionDefinition

/// A tagged sum type. The `"type"` discriminator on the wire selects an
/// option by its wire identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDefinition {
    name: String,
    options: FieldMap,
}

impl UnionDefinition {
    pub fn new(name: impl Into<String>, options: impl IntoIterator<Item = FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            options: FieldMap::new(options),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Internal option name to definition, in declaration order.
    pub fn options(&self) -> &FieldMap {
        &self.options
    }

    /// The option whose wire identifier equals `identifier`.
    pub fn option_for_identifier(&self, identifier: &str) -> Option<(usize, &FieldDefinition)> {
        self.options.get_by_identifier(identifier)
    }
}

// -------------------------------------------------------------------------
// EnumDefinition

/// A declared enum member: the name used for decoding and the wire value
/// used for encoding. Generated code keeps both equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
    name: String,
    value: String,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A closed set of string constants plus the implicit [`UNKNOWN`] member.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDefinition {
    name: String,
    members: Vec<EnumMember>,
}

impl EnumDefinition {
    /// Declares an enum whose member names and wire values coincide.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_members(
            name,
            values.into_iter().map(|value| {
                let value = value.into();
                EnumMember::new(value.clone(), value)
            }),
        )
    }

    /// Declares an enum from explicit members. An explicit `UNKNOWN`
    /// member is folded into the implicit one.
    pub fn with_members(
        name: impl Into<String>,
        members: impl IntoIterator<Item = EnumMember>,
    ) -> Self {
        Self {
            name: name.into(),
            members: members
                .into_iter()
                .filter(|member| member.name != UNKNOWN)
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared members, excluding `UNKNOWN`.
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&EnumMember> {
        self.members.get(index)
    }

    pub fn member_index(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|member| member.name == name)
    }
}

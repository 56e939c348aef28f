//! A member of a declared enum, or its `UNKNOWN` fallback.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::type_def::{EnumDefinition, UNKNOWN};

#[derive(Clone)]
pub struct EnumValue {
    definition: Arc<EnumDefinition>,
    /// `None` is the `UNKNOWN` member.
    index: Option<usize>,
}

impl EnumValue {
    /// The member called `name`, or `UNKNOWN` when no member has that name.
    pub fn of(definition: Arc<EnumDefinition>, name: &str) -> Self {
        let index = definition.member_index(name);
        Self { definition, index }
    }

    pub fn unknown(definition: Arc<EnumDefinition>) -> Self {
        Self {
            definition,
            index: None,
        }
    }

    pub fn definition(&self) -> &Arc<EnumDefinition> {
        &self.definition
    }

    pub fn is_unknown(&self) -> bool {
        self.index.is_none()
    }

    /// Member name.
    pub fn name(&self) -> &str {
        self.index
            .and_then(|index| self.definition.member(index))
            .map_or(UNKNOWN, |member| member.name())
    }

    /// Declared wire value.
    pub fn value(&self) -> &str {
        self.index
            .and_then(|index| self.definition.member(index))
            .map_or(UNKNOWN, |member| member.value())
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.definition.name() == other.definition.name() && self.index == other.index
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.definition.name().hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.definition.name(), self.value())
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

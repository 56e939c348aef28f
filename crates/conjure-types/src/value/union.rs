//! An instance of a union with exactly one active option.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::ConjureValue;
use crate::error::ValueError;
use crate::type_def::{FieldDefinition, UnionDefinition};

#[derive(Clone)]
pub struct UnionValue {
    definition: Arc<UnionDefinition>,
    index: usize,
    value: Box<ConjureValue>,
}

impl UnionValue {
    /// Constructs a union with the option named `option` (internal name)
    /// active.
    pub fn new(
        definition: Arc<UnionDefinition>,
        option: &str,
        value: ConjureValue,
    ) -> Result<Self, ValueError> {
        let Some(index) = definition.options().get_index_of(option) else {
            return Err(ValueError::UnknownOption {
                union: definition.name().to_string(),
                option: option.to_string(),
            });
        };
        Ok(Self {
            definition,
            index,
            value: Box::new(value),
        })
    }

    pub fn definition(&self) -> &Arc<UnionDefinition> {
        &self.definition
    }

    pub fn type_name(&self) -> &str {
        self.definition.name()
    }

    /// Definition of the active option.
    pub fn option(&self) -> &FieldDefinition {
        &self.definition.options()[self.index]
    }

    /// Wire identifier of the active option.
    pub fn type_(&self) -> &str {
        self.option().identifier()
    }

    /// Payload of the active option.
    pub fn value(&self) -> &ConjureValue {
        &self.value
    }

    /// Payload for the option named `name`, `None` unless it is active.
    pub fn get(&self, name: &str) -> Option<&ConjureValue> {
        (self.option().name() == name).then_some(&*self.value)
    }

    /// Consumes the union, yielding the active option's internal name and
    /// its payload.
    pub fn into_inner(self) -> (String, ConjureValue) {
        let name = self.option().name().to_string();
        (name, *self.value)
    }
}

impl PartialEq for UnionValue {
    fn eq(&self, other: &Self) -> bool {
        self.definition.name() == other.definition.name()
            && self.type_() == other.type_()
            && self.value == other.value
    }
}

impl Eq for UnionValue {}

impl Hash for UnionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.definition.name().hash(state);
        self.type_().hash(state);
        self.value.hash(state);
    }
}

impl fmt::Debug for UnionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.definition.name())
            .field(self.option().name(), &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_def::TypeBuilder;

    fn t() -> TypeBuilder {
        TypeBuilder::new()
    }

    fn union_def() -> Arc<UnionDefinition> {
        Arc::new(UnionDefinition::new(
            "TestUnion",
            [
                FieldDefinition::new("field_a", "fieldA", t().Set(t().int())),
                FieldDefinition::new("field_b", "fieldB", t().str()),
                FieldDefinition::new("field_c", "fieldC", t().int()),
            ],
        ))
    }

    #[test]
    fn reports_active_wire_identifier() {
        let value = UnionValue::new(union_def(), "field_b", "foo".into()).expect("valid");
        assert_eq!(value.type_(), "fieldB");
        assert_eq!(value.option().name(), "field_b");
        assert_eq!(value.value(), &ConjureValue::from("foo"));
    }

    #[test]
    fn inactive_options_are_absent() {
        let value = UnionValue::new(union_def(), "field_c", 5.into()).expect("valid");
        assert_eq!(value.get("field_c"), Some(&ConjureValue::from(5)));
        assert_eq!(value.get("field_a"), None);
        assert_eq!(value.get("field_b"), None);
        assert_eq!(value.get("nonexistent"), None);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = UnionValue::new(union_def(), "fieldB", "foo".into()).expect_err("unknown");
        assert_eq!(
            err,
            ValueError::UnknownOption {
                union: "TestUnion".into(),
                option: "fieldB".into(),
            }
        );
    }

    #[test]
    fn equality_requires_tag_and_payload() {
        let a = UnionValue::new(union_def(), "field_b", "bar".into()).expect("valid");
        let a2 = UnionValue::new(union_def(), "field_b", "bar".into()).expect("valid");
        let b = UnionValue::new(union_def(), "field_b", "foo".into()).expect("valid");
        let c = UnionValue::new(union_def(), "field_c", 5.into()).expect("valid");
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn into_inner_returns_option_name() {
        let value = UnionValue::new(union_def(), "field_c", 5.into()).expect("valid");
        assert_eq!(value.into_inner(), ("field_c".to_string(), ConjureValue::from(5)));
    }
}

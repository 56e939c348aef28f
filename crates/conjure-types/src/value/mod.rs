//! In-memory values produced by decoding and consumed by encoding.

pub mod bean;
pub mod enum_value;
pub mod union;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use indexmap::{IndexMap, IndexSet};
use serde_json::Value as JsonValue;

pub use bean::BeanValue;
pub use enum_value::EnumValue;
pub use union::UnionValue;

/// A decoded value.
///
/// Values are `Eq + Hash` so they can be set members and map keys: doubles
/// compare by bit pattern, sets and maps compare without regard to order.
#[derive(Debug, Clone)]
pub enum ConjureValue {
    /// An absent optional, or a union dropped by lenient decoding.
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
    /// A wire value kept as-is (`any` fields and binary payloads).
    Raw(JsonValue),
    List(Vec<ConjureValue>),
    Set(IndexSet<ConjureValue>),
    Map(IndexMap<ConjureValue, ConjureValue>),
    Bean(BeanValue),
    Union(UnionValue),
    Enum(EnumValue),
}

impl ConjureValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Binary(_) => "binary",
            Self::Raw(_) => "raw",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Bean(_) => "bean",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConjureValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&IndexSet<ConjureValue>> {
        match self {
            Self::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<ConjureValue, ConjureValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_bean(&self) -> Option<&BeanValue> {
        match self {
            Self::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionValue> {
        match self {
            Self::Union(union) => Some(union),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for ConjureValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Binary(a), Self::Binary(b)) => a == b,
            (Self::Raw(a), Self::Raw(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Bean(a), Self::Bean(b)) => a == b,
            (Self::Union(a), Self::Union(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ConjureValue {}

impl Hash for ConjureValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Double(d) => d.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::Binary(bytes) => bytes.hash(state),
            // JSON objects compare without regard to key order, their text
            // does not; the discriminant alone keeps Hash consistent with Eq.
            Self::Raw(_) => {}
            Self::List(items) => items.hash(state),
            Self::Set(items) => unordered_hash(items.iter()).hash(state),
            Self::Map(entries) => unordered_hash(entries.iter()).hash(state),
            Self::Bean(bean) => bean.hash(state),
            Self::Union(union) => union.hash(state),
            Self::Enum(value) => value.hash(state),
        }
    }
}

fn unordered_hash<T: Hash>(items: impl Iterator<Item = T>) -> u64 {
    items
        .map(|item| {
            let mut hasher = DefaultHasher::new();
            item.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add)
}

impl From<bool> for ConjureValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ConjureValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ConjureValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ConjureValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for ConjureValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConjureValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<ConjureValue>> for ConjureValue {
    fn from(items: Vec<ConjureValue>) -> Self {
        Self::List(items)
    }
}

impl From<BeanValue> for ConjureValue {
    fn from(value: BeanValue) -> Self {
        Self::Bean(value)
    }
}

impl From<UnionValue> for ConjureValue {
    fn from(value: UnionValue) -> Self {
        Self::Union(value)
    }
}

impl From<EnumValue> for ConjureValue {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hash_of(value: &ConjureValue) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn doubles_compare_by_bits() {
        assert_eq!(ConjureValue::Double(f64::NAN), ConjureValue::Double(f64::NAN));
        assert_ne!(ConjureValue::Double(0.0), ConjureValue::Double(-0.0));
        assert_ne!(ConjureValue::Double(1.0), ConjureValue::Integer(1));
    }

    #[test]
    fn sets_ignore_order() {
        let a: IndexSet<ConjureValue> = [1, 2, 3].into_iter().map(ConjureValue::from).collect();
        let b: IndexSet<ConjureValue> = [3, 1, 2].into_iter().map(ConjureValue::from).collect();
        let (a, b) = (ConjureValue::Set(a), ConjureValue::Set(b));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn maps_ignore_order() {
        let a: IndexMap<ConjureValue, ConjureValue> =
            [("x".into(), 1.into()), ("y".into(), 2.into())].into_iter().collect();
        let b: IndexMap<ConjureValue, ConjureValue> =
            [("y".into(), 2.into()), ("x".into(), 1.into())].into_iter().collect();
        let (a, b) = (ConjureValue::Map(a), ConjureValue::Map(b));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn raw_objects_hash_consistently_with_eq() {
        let mut left = serde_json::Map::new();
        left.insert("a".into(), json!(1));
        left.insert("b".into(), json!(2));
        let mut right = serde_json::Map::new();
        right.insert("b".into(), json!(2));
        right.insert("a".into(), json!(1));
        let (a, b) = (
            ConjureValue::Raw(JsonValue::Object(left)),
            ConjureValue::Raw(JsonValue::Object(right)),
        );
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn set_collapses_equal_elements() {
        let set: IndexSet<ConjureValue> = [1, 2, 2, 3].into_iter().map(ConjureValue::from).collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(ConjureValue::from(3).as_i64(), Some(3));
        assert_eq!(ConjureValue::from(3).as_f64(), Some(3.0));
        assert_eq!(ConjureValue::from("s").as_str(), Some("s"));
        assert_eq!(ConjureValue::from(true).as_bool(), Some(true));
        assert!(ConjureValue::Null.is_null());
        assert_eq!(ConjureValue::from("s").as_i64(), None);
        assert_eq!(ConjureValue::List(vec![]).kind(), "list");
    }
}

//! Conversions between generated Rust types and [`ConjureValue`].
//!
//! Generated beans, unions and enums implement all three traits: the
//! descriptor drives decoding, the conversions move between the decoded
//! value and the concrete struct.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ValueError;
use crate::type_def::{PrimitiveKind, TypeDescriptor};
use crate::value::ConjureValue;

/// A type with a wire description.
pub trait ConjureType {
    fn descriptor() -> TypeDescriptor;
}

pub trait FromConjureValue: Sized {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError>;
}

pub trait IntoConjureValue {
    fn into_conjure_value(self) -> ConjureValue;
}

// -------------------------------------------------------------------------
// ConjureValue itself

impl ConjureType for ConjureValue {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Any
    }
}

impl FromConjureValue for ConjureValue {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl IntoConjureValue for ConjureValue {
    fn into_conjure_value(self) -> ConjureValue {
        self
    }
}

// -------------------------------------------------------------------------
// Scalars

impl ConjureType for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Boolean)
    }
}

impl FromConjureValue for bool {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        value
            .as_bool()
            .ok_or_else(|| ValueError::conversion("boolean", &value))
    }
}

impl IntoConjureValue for bool {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::Bool(self)
    }
}

impl ConjureType for i64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Integer)
    }
}

impl FromConjureValue for i64 {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        value
            .as_i64()
            .ok_or_else(|| ValueError::conversion("integer", &value))
    }
}

impl IntoConjureValue for i64 {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::Integer(self)
    }
}

impl ConjureType for i32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Integer)
    }
}

impl FromConjureValue for i32 {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        value
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| ValueError::conversion("32-bit integer", &value))
    }
}

impl IntoConjureValue for i32 {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::Integer(i64::from(self))
    }
}

impl ConjureType for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Double)
    }
}

impl FromConjureValue for f64 {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        value
            .as_f64()
            .ok_or_else(|| ValueError::conversion("double", &value))
    }
}

impl IntoConjureValue for f64 {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::Double(self)
    }
}

impl ConjureType for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::String)
    }
}

impl FromConjureValue for String {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        match value {
            ConjureValue::String(s) => Ok(s),
            other => Err(ValueError::conversion("string", &other)),
        }
    }
}

impl IntoConjureValue for String {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::String(self)
    }
}

impl IntoConjureValue for &str {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::String(self.to_string())
    }
}

// -------------------------------------------------------------------------
// Containers

impl<T: ConjureType> ConjureType for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::List(Box::new(T::descriptor()))
    }
}

impl<T: FromConjureValue> FromConjureValue for Vec<T> {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        match value {
            ConjureValue::List(items) => items.into_iter().map(T::from_conjure_value).collect(),
            ConjureValue::Set(items) => items.into_iter().map(T::from_conjure_value).collect(),
            other => Err(ValueError::conversion("list", &other)),
        }
    }
}

impl<T: IntoConjureValue> IntoConjureValue for Vec<T> {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::List(self.into_iter().map(T::into_conjure_value).collect())
    }
}

impl<T: ConjureType> ConjureType for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Optional(Box::new(T::descriptor()))
    }
}

impl<T: FromConjureValue> FromConjureValue for Option<T> {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        match value {
            ConjureValue::Null => Ok(None),
            other => T::from_conjure_value(other).map(Some),
        }
    }
}

impl<T: IntoConjureValue> IntoConjureValue for Option<T> {
    fn into_conjure_value(self) -> ConjureValue {
        self.map_or(ConjureValue::Null, T::into_conjure_value)
    }
}

impl<T: ConjureType> ConjureType for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Set(Box::new(T::descriptor()))
    }
}

impl<T: FromConjureValue + Ord> FromConjureValue for BTreeSet<T> {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        match value {
            ConjureValue::Set(items) => items.into_iter().map(T::from_conjure_value).collect(),
            ConjureValue::List(items) => items.into_iter().map(T::from_conjure_value).collect(),
            other => Err(ValueError::conversion("set", &other)),
        }
    }
}

impl<T: IntoConjureValue> IntoConjureValue for BTreeSet<T> {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::Set(self.into_iter().map(T::into_conjure_value).collect())
    }
}

impl<K: ConjureType, V: ConjureType> ConjureType for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Map(Box::new(K::descriptor()), Box::new(V::descriptor()))
    }
}

impl<K: FromConjureValue + Ord, V: FromConjureValue> FromConjureValue for BTreeMap<K, V> {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        match value {
            ConjureValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_conjure_value(k)?, V::from_conjure_value(v)?)))
                .collect(),
            other => Err(ValueError::conversion("map", &other)),
        }
    }
}

impl<K: IntoConjureValue, V: IntoConjureValue> IntoConjureValue for BTreeMap<K, V> {
    fn into_conjure_value(self) -> ConjureValue {
        ConjureValue::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_conjure_value(), v.into_conjure_value()))
                .collect(),
        )
    }
}

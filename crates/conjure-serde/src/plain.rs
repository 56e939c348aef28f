//! Plain encoding: the flat string form of a value used outside JSON
//! bodies.
//!
//! Scalars become a single string. Lists and sets become one string per
//! element, which the transport turns into repeated query parameters.
//! Structured values have no plain form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use conjure_types::ConjureValue;
use serde_json::{Number, Value};

use crate::encoder::non_finite_literal;
use crate::error::EncodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlainValue {
    Single(String),
    Multi(Vec<String>),
}

impl PlainValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Multi(_) => None,
        }
    }

    /// All strings, in order. A single value yields one element.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s],
            Self::Multi(items) => items,
        }
    }
}

pub(crate) fn plain(value: &ConjureValue) -> Result<PlainValue, EncodeError> {
    match value {
        ConjureValue::List(items) => items
            .iter()
            .map(plain_scalar)
            .collect::<Result<Vec<_>, _>>()
            .map(PlainValue::Multi),
        ConjureValue::Set(items) => items
            .iter()
            .map(plain_scalar)
            .collect::<Result<Vec<_>, _>>()
            .map(PlainValue::Multi),
        other => plain_scalar(other).map(PlainValue::Single),
    }
}

fn plain_scalar(value: &ConjureValue) -> Result<String, EncodeError> {
    match value {
        ConjureValue::String(s) => Ok(s.clone()),
        ConjureValue::Bool(b) => Ok(b.to_string()),
        ConjureValue::Integer(i) => Ok(i.to_string()),
        ConjureValue::Double(d) => Ok(format_double(*d)),
        ConjureValue::Binary(bytes) => Ok(STANDARD.encode(bytes)),
        ConjureValue::Enum(member) => Ok(member.value().to_string()),
        ConjureValue::Raw(Value::String(s)) => Ok(s.clone()),
        ConjureValue::Raw(raw @ (Value::Number(_) | Value::Bool(_))) => Ok(raw.to_string()),
        other => Err(EncodeError::PlainEncodeUnsupported {
            kind: describe(other),
        }),
    }
}

fn format_double(d: f64) -> String {
    if let Some(literal) = non_finite_literal(d) {
        return literal.to_string();
    }
    Number::from_f64(d).map_or_else(|| d.to_string(), |n| n.to_string())
}

fn describe(value: &ConjureValue) -> String {
    match value {
        ConjureValue::Bean(bean) => format!("bean {}", bean.type_name()),
        ConjureValue::Union(union) => format!("union {}", union.type_name()),
        ConjureValue::Raw(raw) if raw.is_array() => "raw array".to_string(),
        ConjureValue::Raw(raw) if raw.is_object() => "raw object".to_string(),
        other => other.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_single() {
        assert_eq!(plain(&ConjureValue::Bool(true)).expect("bool"), PlainValue::Single("true".into()));
        assert_eq!(plain(&ConjureValue::Integer(7)).expect("int"), PlainValue::Single("7".into()));
        assert_eq!(plain(&ConjureValue::Double(1.0)).expect("double"), PlainValue::Single("1.0".into()));
        assert_eq!(
            plain(&ConjureValue::Double(f64::INFINITY)).expect("inf"),
            PlainValue::Single("Infinity".into())
        );
    }

    #[test]
    fn lists_are_multi() {
        let value = ConjureValue::List(vec![ConjureValue::Integer(1), ConjureValue::from("test")]);
        assert_eq!(
            plain(&value).expect("list"),
            PlainValue::Multi(vec!["1".into(), "test".into()])
        );
    }

    #[test]
    fn nested_lists_are_rejected() {
        let value = ConjureValue::List(vec![ConjureValue::List(vec![])]);
        let err = plain(&value).expect_err("nested");
        assert_eq!(err.to_string(), "cannot plain-encode a value of type list");
    }

    #[test]
    fn null_and_raw_containers_are_rejected() {
        assert!(plain(&ConjureValue::Null).is_err());
        let err = plain(&ConjureValue::Raw(serde_json::json!({"a": 1}))).expect_err("object");
        assert_eq!(err.to_string(), "cannot plain-encode a value of type raw object");
    }

    #[test]
    fn into_vec_flattens() {
        assert_eq!(PlainValue::Single("a".into()).into_vec(), vec!["a".to_string()]);
        assert_eq!(PlainValue::Multi(vec![]).as_single(), None);
    }
}

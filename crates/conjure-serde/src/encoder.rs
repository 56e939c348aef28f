//! JSON encoding of [`ConjureValue`]s.
//!
//! Encoding needs no descriptor: the value carries its own shape. Beans
//! become objects keyed by wire identifier, unions become
//! `{"type": id, id: payload}`, enums become their wire string and
//! non-finite doubles become `"NaN"`, `"Infinity"` or `"-Infinity"`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use conjure_types::{BeanValue, ConjureValue, UnionValue};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::EncodeError;
use crate::plain::{plain, PlainValue};

/// Runtime value encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConjureEncoder;

impl ConjureEncoder {
    /// Encodes `value` as a JSON tree.
    pub fn encode(value: &ConjureValue) -> Value {
        encode_value(value)
    }

    /// Compact JSON text.
    pub fn to_string(value: &ConjureValue) -> String {
        encode_value(value).to_string()
    }

    pub fn to_vec(value: &ConjureValue) -> Vec<u8> {
        Self::to_string(value).into_bytes()
    }

    /// Flat text for headers, path segments and query parameters.
    pub fn plain(value: &ConjureValue) -> Result<PlainValue, EncodeError> {
        plain(value)
    }
}

/// Borrowed [`ConjureValue`] that serializes through the encoder, for use
/// anywhere a [`Serialize`] body is expected.
#[derive(Debug, Clone, Copy)]
pub struct JsonBody<'a>(pub &'a ConjureValue);

impl Serialize for JsonBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_value(self.0).serialize(serializer)
    }
}

fn encode_value(value: &ConjureValue) -> Value {
    match value {
        ConjureValue::Null => Value::Null,
        ConjureValue::Bool(b) => Value::Bool(*b),
        ConjureValue::Integer(i) => Value::Number((*i).into()),
        ConjureValue::Double(d) => encode_double(*d),
        ConjureValue::String(s) => Value::String(s.clone()),
        ConjureValue::Binary(bytes) => Value::String(STANDARD.encode(bytes)),
        ConjureValue::Raw(raw) => raw.clone(),
        ConjureValue::List(items) => Value::Array(items.iter().map(encode_value).collect()),
        ConjureValue::Set(items) => Value::Array(items.iter().map(encode_value).collect()),
        ConjureValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, val)| (encode_key(key), encode_value(val)))
                .collect(),
        ),
        ConjureValue::Bean(bean) => encode_bean(bean),
        ConjureValue::Union(union) => encode_union(union),
        ConjureValue::Enum(member) => Value::String(member.value().to_string()),
    }
}

fn encode_bean(bean: &BeanValue) -> Value {
    let mut object = Map::new();
    for (field, val) in bean.iter() {
        object.insert(field.identifier().to_string(), encode_value(val));
    }
    Value::Object(object)
}

fn encode_union(union: &UnionValue) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), Value::String(union.type_().to_string()));
    object.insert(union.type_().to_string(), encode_value(union.value()));
    Value::Object(object)
}

/// Object keys must be strings: string encodings are used as is, anything
/// else as its JSON text.
fn encode_key(key: &ConjureValue) -> String {
    match encode_value(key) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn encode_double(d: f64) -> Value {
    match non_finite_literal(d) {
        Some(literal) => Value::String(literal.to_string()),
        None => Number::from_f64(d).map_or(Value::Null, Value::Number),
    }
}

pub(crate) fn non_finite_literal(d: f64) -> Option<&'static str> {
    if d.is_nan() {
        Some("NaN")
    } else if d == f64::INFINITY {
        Some("Infinity")
    } else if d == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert_eq!(ConjureEncoder::encode(&ConjureValue::Null), Value::Null);
        assert_eq!(ConjureEncoder::encode(&ConjureValue::Integer(-3)), json!(-3));
        assert_eq!(ConjureEncoder::encode(&ConjureValue::Double(0.5)), json!(0.5));
        assert_eq!(ConjureEncoder::encode(&ConjureValue::from("a")), json!("a"));
    }

    #[test]
    fn non_finite_doubles_become_strings() {
        assert_eq!(ConjureEncoder::encode(&ConjureValue::Double(f64::NAN)), json!("NaN"));
        assert_eq!(ConjureEncoder::encode(&ConjureValue::Double(f64::INFINITY)), json!("Infinity"));
        assert_eq!(
            ConjureEncoder::encode(&ConjureValue::Double(f64::NEG_INFINITY)),
            json!("-Infinity")
        );
    }

    #[test]
    fn binary_is_base64_text() {
        let value = ConjureValue::Binary(b"hello".to_vec());
        assert_eq!(ConjureEncoder::encode(&value), json!("aGVsbG8="));
    }

    #[test]
    fn raw_passes_through() {
        let raw = json!({"nested": [1, {"x": null}]});
        assert_eq!(ConjureEncoder::encode(&ConjureValue::Raw(raw.clone())), raw);
    }

    #[test]
    fn map_keys_are_stringified() {
        let mut entries = indexmap::IndexMap::new();
        entries.insert(ConjureValue::Integer(1), ConjureValue::from("one"));
        entries.insert(ConjureValue::Bool(false), ConjureValue::from("no"));
        entries.insert(ConjureValue::from("k"), ConjureValue::from("v"));
        let encoded = ConjureEncoder::encode(&ConjureValue::Map(entries));
        assert_eq!(encoded, json!({"1": "one", "false": "no", "k": "v"}));
    }

    #[test]
    fn text_and_body_agree() {
        let value = ConjureValue::List(vec![ConjureValue::Integer(1), ConjureValue::Double(f64::NAN)]);
        let text = ConjureEncoder::to_string(&value);
        assert_eq!(text, r#"[1,"NaN"]"#);
        assert_eq!(serde_json::to_string(&JsonBody(&value)).expect("body"), text);
        assert_eq!(ConjureEncoder::to_vec(&value), text.into_bytes());
    }
}

//! Descriptor-driven JSON decoding.
//!
//! A runtime recursive decoder: each [`TypeDescriptor`] variant has one
//! decode routine, and structured types recurse through their field types.
//! Field lookup, defaults for omitted collections and optionals, union
//! discrimination and the `UNKNOWN` enum fallback all live here.

use std::sync::Arc;

use conjure_types::{
    BeanDefinition, BeanValue, ConjureType, ConjureValue, EnumDefinition, EnumValue,
    FieldDefinition, FromConjureValue, PrimitiveKind, TypeDescriptor, TypeRegistry,
    UnionDefinition, UnionValue, ValueError,
};
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Toggles for the lenient corners of the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Decode unions with an unrecognised `type` to `Null` instead of
    /// failing.
    pub lenient_unions: bool,
    /// Also look bean fields up under their hyphenated name
    /// (`file-system-id` for `file_system_id`).
    pub hyphen_tolerant: bool,
}

/// Decodes parsed JSON into [`ConjureValue`]s.
///
/// The decoder is immutable once built; share it freely.
#[derive(Debug, Clone, Default)]
pub struct ConjureDecoder {
    options: DecoderOptions,
    registry: Option<Arc<TypeRegistry>>,
}

impl ConjureDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            options,
            registry: None,
        }
    }

    /// Resolves [`TypeDescriptor::Ref`] names against `registry`.
    pub fn registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn lenient_unions(mut self, enabled: bool) -> Self {
        self.options.lenient_unions = enabled;
        self
    }

    pub fn hyphen_tolerant(mut self, enabled: bool) -> Self {
        self.options.hyphen_tolerant = enabled;
        self
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Decodes `value` as `ty`.
    pub fn decode(&self, value: &Value, ty: &TypeDescriptor) -> Result<ConjureValue, DecodeError> {
        match ty {
            TypeDescriptor::Any | TypeDescriptor::Binary => Ok(ConjureValue::Raw(value.clone())),
            TypeDescriptor::Primitive(kind) => decode_primitive(value, *kind),
            TypeDescriptor::List(item) => {
                let items = expect_array(value, ty)?;
                items
                    .iter()
                    .map(|item_value| self.decode(item_value, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(ConjureValue::List)
            }
            TypeDescriptor::Set(item) => {
                let items = expect_array(value, ty)?;
                items
                    .iter()
                    .map(|item_value| self.decode(item_value, item))
                    .collect::<Result<IndexSet<_>, _>>()
                    .map(ConjureValue::Set)
            }
            TypeDescriptor::Map(key, val) => self.decode_map(value, ty, key, val),
            TypeDescriptor::Optional(item) => {
                if value.is_null() {
                    Ok(ConjureValue::Null)
                } else {
                    self.decode(value, item)
                }
            }
            TypeDescriptor::Bean(def) => self.decode_bean(value, def),
            TypeDescriptor::Union(def) => self.decode_union(value, def),
            TypeDescriptor::Enum(def) => Ok(decode_enum(value, def)),
            TypeDescriptor::Ref(name) => {
                let target = self.resolve_name(name)?;
                self.decode(value, target)
            }
        }
    }

    /// Parses `text` as JSON, then decodes it as `ty`.
    pub fn read_from_str(&self, text: &str, ty: &TypeDescriptor) -> Result<ConjureValue, DecodeError> {
        let parsed: Value = serde_json::from_str(text)?;
        self.decode(&parsed, ty)
    }

    pub fn read_from_slice(&self, bytes: &[u8], ty: &TypeDescriptor) -> Result<ConjureValue, DecodeError> {
        let parsed: Value = serde_json::from_slice(bytes)?;
        self.decode(&parsed, ty)
    }

    /// Decodes `value` using `T`'s descriptor and converts the result to `T`.
    pub fn decode_as<T>(&self, value: &Value) -> Result<T, DecodeError>
    where
        T: ConjureType + FromConjureValue,
    {
        let decoded = self.decode(value, &T::descriptor())?;
        Ok(T::from_conjure_value(decoded)?)
    }

    pub fn read_as<T>(&self, text: &str) -> Result<T, DecodeError>
    where
        T: ConjureType + FromConjureValue,
    {
        let parsed: Value = serde_json::from_str(text)?;
        self.decode_as(&parsed)
    }

    fn resolve_name(&self, name: &str) -> Result<&TypeDescriptor, DecodeError> {
        let Some(registry) = &self.registry else {
            return Err(ValueError::UnresolvedReference(name.to_string()).into());
        };
        Ok(registry.resolve(name)?)
    }

    /// Follows a reference to its target; other descriptors come back as is.
    fn resolve<'a>(&'a self, ty: &'a TypeDescriptor) -> Result<&'a TypeDescriptor, DecodeError> {
        match (&self.registry, ty) {
            (Some(registry), _) => Ok(registry.resolve_descriptor(ty)?),
            (None, TypeDescriptor::Ref(name)) => {
                Err(ValueError::UnresolvedReference(name.clone()).into())
            }
            (None, other) => Ok(other),
        }
    }

    fn decode_map(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
        key_ty: &TypeDescriptor,
        value_ty: &TypeDescriptor,
    ) -> Result<ConjureValue, DecodeError> {
        let object = expect_object(value, ty)?;
        let resolved_key = self.resolve(key_ty)?;
        let string_keyed = resolved_key.is_string_keyed();
        let double_keyed = matches!(
            resolved_key,
            TypeDescriptor::Primitive(PrimitiveKind::Double)
        );
        let mut entries = IndexMap::with_capacity(object.len());
        for (raw_key, raw_value) in object {
            let key = if string_keyed {
                self.decode(&Value::String(raw_key.clone()), key_ty)?
            } else {
                match serde_json::from_str::<Value>(raw_key) {
                    Ok(parsed) => self.decode(&parsed, key_ty)?,
                    // Non-finite doubles are written as bare `NaN` / `Infinity` keys.
                    Err(_) if double_keyed && parse_non_finite(raw_key).is_some() => {
                        self.decode(&Value::String(raw_key.clone()), key_ty)?
                    }
                    Err(source) => {
                        return Err(DecodeError::InvalidKey {
                            key: raw_key.clone(),
                            source,
                        })
                    }
                }
            };
            // Keys that decode equal keep the last value seen.
            entries.insert(key, self.decode(raw_value, value_ty)?);
        }
        Ok(ConjureValue::Map(entries))
    }

    fn decode_bean(&self, value: &Value, def: &Arc<BeanDefinition>) -> Result<ConjureValue, DecodeError> {
        let object = value.as_object().ok_or_else(|| DecodeError::TypeMismatch {
            expected: def.name().to_string(),
            actual: json_kind(value),
        })?;
        let mut fields = Vec::with_capacity(def.fields().len());
        for field in def.fields() {
            let decoded = match self.find_field(object, field) {
                Some(field_value) if !field_value.is_null() => {
                    self.decode(field_value, field.field_type())?
                }
                _ => self.missing_value(field, value)?,
            };
            fields.push((field.name(), decoded));
        }
        Ok(ConjureValue::Bean(BeanValue::new(Arc::clone(def), fields)?))
    }

    fn decode_union(&self, value: &Value, def: &Arc<UnionDefinition>) -> Result<ConjureValue, DecodeError> {
        let object = value.as_object().ok_or_else(|| DecodeError::TypeMismatch {
            expected: def.name().to_string(),
            actual: json_kind(value),
        })?;
        let discriminator = match object.get("type") {
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingField {
                    field: "type".to_string(),
                    object: value.to_string(),
                })
            }
            Some(Value::String(discriminator)) => discriminator,
            Some(other) => {
                return Err(DecodeError::TypeMismatch {
                    expected: PrimitiveKind::String.name().to_string(),
                    actual: json_kind(other),
                })
            }
        };
        let Some((_, option)) = def.option_for_identifier(discriminator) else {
            if self.options.lenient_unions {
                log::debug!(
                    "ignoring unknown variant {discriminator} of union {}",
                    def.name()
                );
                return Ok(ConjureValue::Null);
            }
            return Err(DecodeError::UnknownVariant {
                variant: discriminator.clone(),
                union: def.name().to_string(),
            });
        };
        let payload = match object.get(option.identifier()) {
            Some(option_value) if !option_value.is_null() => {
                self.decode(option_value, option.field_type())?
            }
            _ => self.missing_value(option, value)?,
        };
        Ok(ConjureValue::Union(UnionValue::new(
            Arc::clone(def),
            option.name(),
            payload,
        )?))
    }

    fn find_field<'a>(&self, object: &'a Map<String, Value>, field: &FieldDefinition) -> Option<&'a Value> {
        field
            .candidate_keys(self.options.hyphen_tolerant)
            .iter()
            .find_map(|key| object.get(key.as_ref()))
    }

    /// Default for an omitted or `null` field, or the error naming it.
    fn missing_value(&self, field: &FieldDefinition, object: &Value) -> Result<ConjureValue, DecodeError> {
        self.resolve(field.field_type())?
            .empty_value()
            .ok_or_else(|| DecodeError::MissingField {
                field: field.identifier().to_string(),
                object: object.to_string(),
            })
    }
}

fn decode_primitive(value: &Value, kind: PrimitiveKind) -> Result<ConjureValue, DecodeError> {
    let decoded = match (kind, value) {
        (PrimitiveKind::Boolean, Value::Bool(b)) => Some(ConjureValue::Bool(*b)),
        (PrimitiveKind::Integer, Value::Number(n)) => n.as_i64().map(ConjureValue::Integer),
        (PrimitiveKind::Double, Value::Number(n)) => n.as_f64().map(ConjureValue::Double),
        (PrimitiveKind::Double, Value::String(s)) => parse_non_finite(s).map(ConjureValue::Double),
        (PrimitiveKind::String, Value::String(s)) => Some(ConjureValue::String(s.clone())),
        _ => None,
    };
    decoded.ok_or_else(|| DecodeError::TypeMismatch {
        expected: kind.name().to_string(),
        actual: json_kind(value),
    })
}

/// Doubles that JSON numbers cannot carry travel as these strings.
fn parse_non_finite(s: &str) -> Option<f64> {
    match s {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn decode_enum(value: &Value, def: &Arc<EnumDefinition>) -> ConjureValue {
    let decoded = match value.as_str() {
        Some(name) => EnumValue::of(Arc::clone(def), name),
        None => EnumValue::unknown(Arc::clone(def)),
    };
    ConjureValue::Enum(decoded)
}

fn expect_array<'a>(value: &'a Value, ty: &TypeDescriptor) -> Result<&'a Vec<Value>, DecodeError> {
    value.as_array().ok_or_else(|| DecodeError::TypeMismatch {
        expected: ty.to_string(),
        actual: json_kind(value),
    })
}

fn expect_object<'a>(value: &'a Value, ty: &TypeDescriptor) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or_else(|| DecodeError::TypeMismatch {
        expected: ty.to_string(),
        actual: json_kind(value),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

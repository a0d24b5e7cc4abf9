//! The shapes a logged value can take.
//!
//! Every attribute value is converted into a [`Value`] before it reaches a
//! handler. The enum is deliberately closed: the redactor dispatches on it
//! exhaustively, and handlers serialize it without knowing the original type.
//!
//! Conversion happens through [`ToValue`], implemented for common std types
//! and generated by `#[derive(ToValue)]` for records, which is where field
//! names and `#[sensitive]` tags come from.

mod to_value;

use std::{borrow::Cow, error::Error as StdError, fmt};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;

pub use to_value::ToValue;

use crate::record::Attr;

/// A structured log value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Unit, unit structs and JSON `null`.
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    /// Ordered sequence or fixed-size array.
    Seq(Vec<Value>),
    /// String-keyed mapping. Entry order is kept as given.
    Map(Vec<(String, Value)>),
    /// Named-field or tuple record, usually produced by `#[derive(ToValue)]`.
    Struct(StructValue),
    /// Absent (`None`) or present value.
    Optional(Option<Box<Value>>),
    /// An enum variant with an optional payload.
    Variant(VariantValue),
    /// Attribute group; members keep their own keys.
    Group(Vec<Attr>),
    /// A value of a kind the redactor does not look into, pre-rendered as text.
    Opaque(String),
}

impl Value {
    /// Captures any `Debug` value as an opaque string.
    ///
    /// Opaque values are forwarded as-is: nothing inside them is redacted.
    pub fn opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Opaque(format!("{value:?}"))
    }

    /// Renders an error and its source chain.
    ///
    /// The result is a map with `msg` and, when the error has sources,
    /// `causes` listing each source message outermost first.
    pub fn error(err: &(dyn StdError + 'static)) -> Self {
        let mut entries = vec![("msg".to_owned(), Self::Str(err.to_string()))];
        let causes: Vec<Value> = std::iter::successors(err.source(), |&e| e.source())
            .map(|cause| Self::Str(cause.to_string()))
            .collect();
        if !causes.is_empty() {
            entries.push(("causes".to_owned(), Self::Seq(causes)));
        }
        Self::Map(entries)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) | Self::Opaque(value) => Some(value),
            _ => None,
        }
    }

    /// Converts into a `serde_json::Value` with the same layout handlers emit.
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// Layout of a [`StructValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructStyle {
    /// `struct S { a: T }`: fields have meaningful names.
    Named,
    /// `struct S(T, U)`: fields are positional. A single-field tuple
    /// serializes as its inner value.
    Tuple,
}

/// A record with declared fields.
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    pub name: Cow<'static, str>,
    pub style: StructStyle,
    pub fields: Vec<Field>,
}

impl StructValue {
    pub fn named(name: impl Into<Cow<'static, str>>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            style: StructStyle::Named,
            fields,
        }
    }

    pub fn tuple(name: impl Into<Cow<'static, str>>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            style: StructStyle::Tuple,
            fields,
        }
    }

    /// Looks up a field by exposed name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// One declared field of a [`StructValue`].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Exposed name: the serde rename if declared, otherwise the field name.
    pub name: Cow<'static, str>,
    /// Set by `#[sensitive]`. Forces redaction regardless of the key set.
    pub sensitive: bool,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<Cow<'static, str>>, sensitive: bool, value: Value) -> Self {
        Self {
            name: name.into(),
            sensitive,
            value,
        }
    }
}

/// An enum variant.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantValue {
    pub enum_name: Cow<'static, str>,
    pub variant: Cow<'static, str>,
    /// `None` for unit variants.
    pub payload: Option<Box<Value>>,
}

impl VariantValue {
    pub fn unit(
        enum_name: impl Into<Cow<'static, str>>,
        variant: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            enum_name: enum_name.into(),
            variant: variant.into(),
            payload: None,
        }
    }

    pub fn new(
        enum_name: impl Into<Cow<'static, str>>,
        variant: impl Into<Cow<'static, str>>,
        payload: Value,
    ) -> Self {
        Self {
            enum_name: enum_name.into(),
            variant: variant.into(),
            payload: Some(Box::new(payload)),
        }
    }
}

// Layout follows serde's defaults: named records become objects, newtypes
// are transparent, variants are externally tagged.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::I64(value) => serializer.serialize_i64(*value),
            Self::U64(value) => serializer.serialize_u64(*value),
            Self::F64(value) => serializer.serialize_f64(*value),
            Self::Str(value) | Self::Opaque(value) => serializer.serialize_str(value),
            Self::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Group(attrs) => {
                let mut map = serializer.serialize_map(Some(attrs.len()))?;
                for attr in attrs {
                    map.serialize_entry(&attr.key, &attr.value)?;
                }
                map.end()
            }
            Self::Struct(record) => record.serialize(serializer),
            Self::Optional(None) => serializer.serialize_none(),
            Self::Optional(Some(value)) => serializer.serialize_some(value.as_ref()),
            Self::Variant(variant) => match &variant.payload {
                None => serializer.serialize_str(&variant.variant),
                Some(payload) => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry(variant.variant.as_ref(), payload.as_ref())?;
                    map.end()
                }
            },
        }
    }
}

impl Serialize for StructValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self.style, self.fields.as_slice()) {
            (StructStyle::Tuple, [only]) => only.value.serialize(serializer),
            (StructStyle::Tuple, fields) => {
                let mut seq = serializer.serialize_seq(Some(fields.len()))?;
                for field in fields {
                    seq.serialize_element(&field.value)?;
                }
                seq.end()
            }
            (StructStyle::Named, fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for field in fields {
                    map.serialize_entry(field.name.as_ref(), &field.value)?;
                }
                map.end()
            }
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(value) => Self::Bool(value),
            JsonValue::Number(number) => {
                if let Some(value) = number.as_u64() {
                    Self::U64(value)
                } else if let Some(value) = number.as_i64() {
                    Self::I64(value)
                } else {
                    Self::F64(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(value) => Self::Str(value),
            JsonValue::Array(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

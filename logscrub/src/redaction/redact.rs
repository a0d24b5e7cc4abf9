//! Depth-bounded deep copy with redaction.
//!
//! [`Redactor`] walks a borrowed [`Value`] and builds a new one with the same
//! shape, replacing sensitive strings with the policy's marker. The input is
//! never modified, and nothing in the output shares storage with it.
//!
//! Sensitivity is decided at string leaves, using the name of the field the
//! string was reached through:
//!
//! | Shape | Field name passed down | Tag passed down |
//! |-------|------------------------|-----------------|
//! | named struct field | the field's exposed name | the field's `#[sensitive]` |
//! | tuple struct field | the parent's name | the field's `#[sensitive]` |
//! | map / group entry | the entry key | none |
//! | sequence element | the parent's name | the parent's |
//! | optional / variant payload | the parent's name | the parent's |
//!
//! Strings that hold a JSON object are parsed, redacted entry by entry and
//! re-encoded. Anything that fails to parse is treated as plain text.

use serde_json::Value as JsonValue;

use super::policy::{RedactionPolicy, MAX_DEPTH};
use crate::{
    keys::SensitiveKeySet,
    record::Attr,
    value::{Field, StructStyle, StructValue, Value, VariantValue},
};

/// Immutable redaction configuration: which keys are sensitive and what
/// replaces them.
///
/// A `Redactor` holds no per-call state and is shared freely across threads.
#[derive(Clone, Debug)]
pub struct Redactor {
    keys: SensitiveKeySet,
    policy: RedactionPolicy,
}

impl Redactor {
    pub fn new(keys: SensitiveKeySet, policy: RedactionPolicy) -> Self {
        Self { keys, policy }
    }

    pub fn keys(&self) -> &SensitiveKeySet {
        &self.keys
    }

    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Returns a redacted deep copy of `value` reached through `field_name`.
    pub fn redact(&self, field_name: &str, value: &Value) -> Value {
        self.redact_tagged(field_name, value, false)
    }

    /// Like [`redact`](Self::redact), with an explicit redaction tag.
    ///
    /// When `tagged` is true, strings are redacted even if `field_name` is not
    /// in the key set.
    pub fn redact_tagged(&self, field_name: &str, value: &Value, tagged: bool) -> Value {
        self.visit(field_name, value, tagged, 0)
    }

    /// Redacts an attribute using its key as the field name.
    pub fn redact_attr(&self, attr: &Attr) -> Attr {
        Attr {
            key: attr.key.clone(),
            value: self.redact(&attr.key, &attr.value),
        }
    }

    fn visit(&self, field_name: &str, value: &Value, tagged: bool, depth: usize) -> Value {
        if depth > MAX_DEPTH {
            return self.policy.beyond_depth(value);
        }
        let next = depth + 1;

        match value {
            Value::Null
            | Value::Bool(_)
            | Value::I64(_)
            | Value::U64(_)
            | Value::F64(_)
            | Value::Opaque(_) => value.clone(),
            Value::Str(text) => self.visit_str(field_name, text, tagged, next),
            Value::Seq(items) => Value::Seq(
                items
                    .iter()
                    .map(|item| self.visit(field_name, item, tagged, next))
                    .collect(),
            ),
            Value::Map(entries) => Value::Map(self.visit_entries(entries, next)),
            Value::Group(attrs) => Value::Group(
                attrs
                    .iter()
                    .map(|attr| Attr {
                        key: attr.key.clone(),
                        value: self.visit(&attr.key, &attr.value, false, next),
                    })
                    .collect(),
            ),
            Value::Struct(record) => Value::Struct(self.visit_struct(field_name, record, next)),
            Value::Optional(inner) => Value::Optional(
                inner
                    .as_ref()
                    .map(|inner| Box::new(self.visit(field_name, inner, tagged, next))),
            ),
            Value::Variant(variant) => Value::Variant(VariantValue {
                enum_name: variant.enum_name.clone(),
                variant: variant.variant.clone(),
                payload: variant
                    .payload
                    .as_ref()
                    .map(|payload| Box::new(self.visit(field_name, payload, tagged, next))),
            }),
        }
    }

    fn visit_str(&self, field_name: &str, text: &str, tagged: bool, next: usize) -> Value {
        if tagged || self.keys.matches(field_name) {
            return self.policy.redacted();
        }
        match self.redact_document(text, next) {
            Some(document) => Value::Str(document),
            None => Value::Str(text.to_owned()),
        }
    }

    fn visit_entries(&self, entries: &[(String, Value)], depth: usize) -> Vec<(String, Value)> {
        entries
            .iter()
            .map(|(key, value)| (key.clone(), self.visit(key, value, false, depth)))
            .collect()
    }

    fn visit_struct(&self, field_name: &str, record: &StructValue, depth: usize) -> StructValue {
        let fields = record
            .fields
            .iter()
            .map(|field| {
                let name: &str = match record.style {
                    StructStyle::Named => &field.name,
                    StructStyle::Tuple => field_name,
                };
                Field {
                    name: field.name.clone(),
                    sensitive: field.sensitive,
                    value: self.visit(name, &field.value, field.sensitive, depth),
                }
            })
            .collect();
        StructValue {
            name: record.name.clone(),
            style: record.style,
            fields,
        }
    }

    /// Redacts a string holding a JSON object. Returns `None` when the text is
    /// not a JSON object, in which case the caller keeps it verbatim.
    fn redact_document(&self, text: &str, depth: usize) -> Option<String> {
        if !text.trim_start().starts_with('{') {
            return None;
        }
        let JsonValue::Object(object) = serde_json::from_str::<JsonValue>(text).ok()? else {
            return None;
        };
        // Sensitive entries of the document are masked whatever their type.
        let entries: Vec<(String, Value)> = object
            .into_iter()
            .map(|(key, value)| {
                let value = if self.keys.matches(&key) {
                    self.policy.redacted()
                } else {
                    self.visit(&key, &Value::from(value), false, depth)
                };
                (key, value)
            })
            .collect();
        serde_json::to_string(&Value::Map(entries)).ok()
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(SensitiveKeySet::default(), RedactionPolicy::default())
    }
}

/// Redacts `value` with the default key set and policy.
pub fn redact(field_name: &str, value: &Value) -> Value {
    Redactor::default().redact(field_name, value)
}

impl From<SensitiveKeySet> for Redactor {
    fn from(keys: SensitiveKeySet) -> Self {
        Self::new(keys, RedactionPolicy::default())
    }
}

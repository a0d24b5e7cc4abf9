//! Conversion of Rust values into [`Value`].
//!
//! Std containers convert structurally: sequences become [`Value::Seq`], maps
//! become [`Value::Map`] with their keys rendered through `Display`, `Option`
//! becomes [`Value::Optional`] and smart pointers are transparent. Records get
//! their implementation from `#[derive(ToValue)]`.
//!
//! Types from other crates that have no implementation here can still be
//! logged with [`Value::opaque`], at the cost of not being looked into.

use std::{
    borrow::Cow,
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt::Display,
    marker::PhantomData,
    rc::Rc,
    sync::Arc,
};

use super::{Value, VariantValue};

/// Types that can be turned into a structured log [`Value`].
///
/// Use `#[derive(ToValue)]` on your own structs and enums. The derive reads
/// `#[sensitive]` tags and serde renames to build named-field metadata.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be logged as a structured value",
    label = "this type does not implement `ToValue`",
    note = "use `#[derive(ToValue)]` on the type definition",
    note = "or wrap it with `Value::opaque(&value)` to log its `Debug` output"
)]
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::Str(self.as_ref().to_owned())
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

macro_rules! impl_to_value_signed {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::I64(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_to_value_unsigned {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::U64(u64::from(*self))
                }
            }
        )*
    };
}

impl_to_value_signed!(i8, i16, i32, i64);
impl_to_value_unsigned!(u8, u16, u32, u64);

impl ToValue for isize {
    fn to_value(&self) -> Value {
        i64::try_from(*self).map_or_else(|_| Value::Opaque(self.to_string()), Value::I64)
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value {
        u64::try_from(*self).map_or_else(|_| Value::Opaque(self.to_string()), Value::U64)
    }
}

// Wider than JSON numbers can carry losslessly; out-of-range values are kept
// as their decimal text.
impl ToValue for i128 {
    fn to_value(&self) -> Value {
        i64::try_from(*self).map_or_else(|_| Value::Opaque(self.to_string()), Value::I64)
    }
}

impl ToValue for u128 {
    fn to_value(&self) -> Value {
        u64::try_from(*self).map_or_else(|_| Value::Opaque(self.to_string()), Value::U64)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::F64(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::F64(*self)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &mut T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for RefCell<T> {
    fn to_value(&self) -> Value {
        self.try_borrow()
            .map_or_else(|_| Value::Opaque("<borrowed>".to_owned()), |v| v.to_value())
    }
}

impl<T> ToValue for PhantomData<T> {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|value| Box::new(value.to_value())))
    }
}

impl<T: ToValue, E: ToValue> ToValue for Result<T, E> {
    fn to_value(&self) -> Value {
        let (variant, payload) = match self {
            Ok(value) => ("Ok", value.to_value()),
            Err(err) => ("Err", err.to_value()),
        };
        Value::Variant(VariantValue::new("Result", variant, payload))
    }
}

fn seq<'a, T, I>(items: I) -> Value
where
    T: ToValue + 'a,
    I: IntoIterator<Item = &'a T>,
{
    Value::Seq(items.into_iter().map(ToValue::to_value).collect())
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        seq(self)
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        seq(self)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        seq(self)
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        seq(self)
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        seq(self)
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        seq(self)
    }
}

impl<K: Display, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_value()))
                .collect(),
        )
    }
}

// Hash maps iterate in arbitrary order; entries are sorted by key so the same
// map always logs the same way.
impl<K: Display, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        let mut entries: Vec<(String, Value)> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Map(entries)
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl<Tz> ToValue for chrono::DateTime<Tz>
where
    Tz: chrono::TimeZone,
    Tz::Offset: Display,
{
    fn to_value(&self) -> Value {
        Value::Str(self.to_rfc3339())
    }
}

impl ToValue for uuid::Uuid {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for std::net::IpAddr {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for std::time::Duration {
    fn to_value(&self) -> Value {
        Value::F64(self.as_secs_f64())
    }
}

//! Request-scoped attributes.
//!
//! A [`Context`] carries attributes that belong to a unit of work rather than
//! to a single log call, such as a request id. Handlers merge them ahead of the
//! record's own attributes.

use std::sync::Arc;

use crate::{record::Attr, value::ToValue};

/// Key under which [`Context::with_request_id`] stores the id.
pub const REQUEST_ID_KEY: &str = "request_id";

/// An immutable, cheaply cloned set of attributes.
///
/// Appending returns a new context and leaves the original untouched.
#[derive(Clone, Debug, Default)]
pub struct Context {
    attrs: Arc<Vec<Attr>>,
}

impl Context {
    /// A context with no attributes.
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn append(&self, attr: Attr) -> Self {
        let mut attrs = Vec::with_capacity(self.attrs.len() + 1);
        attrs.extend(self.attrs.iter().cloned());
        attrs.push(attr);
        Self {
            attrs: Arc::new(attrs),
        }
    }

    #[must_use]
    pub fn with<V>(&self, key: impl Into<String>, value: &V) -> Self
    where
        V: ToValue + ?Sized,
    {
        self.append(Attr::new(key, value))
    }

    #[must_use]
    pub fn with_request_id(&self, id: impl Into<String>) -> Self {
        self.append(Attr::from_value(REQUEST_ID_KEY, id.into().into()))
    }

    /// Attaches a freshly generated v4 UUID as the request id.
    #[must_use]
    pub fn with_generated_request_id(&self) -> Self {
        self.with_request_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Context, REQUEST_ID_KEY};
    use crate::{record::Attr, value::Value};

    #[test]
    fn background_is_empty() {
        assert!(Context::background().is_empty());
    }

    #[test]
    fn append_leaves_the_parent_unchanged() {
        let parent = Context::background().with("tenant", "acme");
        let child = parent.append(Attr::new("attempt", &2_u8));
        assert_eq!(parent.attrs().len(), 1);
        assert_eq!(child.attrs().len(), 2);
        assert_eq!(child.attrs()[0].key, "tenant");
        assert_eq!(child.attrs()[1].value, Value::U64(2));
    }

    #[test]
    fn generated_request_ids_are_uuids() {
        let ctx = Context::background().with_generated_request_id();
        let attr = &ctx.attrs()[0];
        assert_eq!(attr.key, REQUEST_ID_KEY);
        let id = attr.value.as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let other = Context::background().with_generated_request_id();
        assert_ne!(other.attrs()[0].value, attr.value);
    }
}

//! What a redacted value is replaced with, and what happens past the depth bound.
//!
//! Policies are pure configuration. They do not traverse values or decide
//! which fields are sensitive; that belongs to the redactor and the key set.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Default placeholder substituted for sensitive strings.
pub const DEFAULT_REDACTION_MARKER: &str = "*";

/// Deepest nesting level the redactor descends into. The top-level value is
/// level zero.
pub const MAX_DEPTH: usize = 32;

/// Behavior for values nested deeper than [`MAX_DEPTH`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolicy {
    /// Stop descending and keep the remaining subtree exactly as it was.
    ///
    /// Sensitive data nested that deep is logged in clear text.
    #[default]
    FailOpen,
    /// Replace the unexamined subtree with the redaction marker.
    FailClosed,
}

/// Replacement text and depth behavior used by a [`Redactor`](super::Redactor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedactionPolicy {
    marker: Cow<'static, str>,
    depth: DepthPolicy,
}

impl RedactionPolicy {
    /// Uses `marker` as the placeholder text.
    #[must_use]
    pub fn with_marker<M>(marker: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        Self {
            marker: marker.into(),
            depth: DepthPolicy::default(),
        }
    }

    #[must_use]
    pub fn depth_policy(mut self, depth: DepthPolicy) -> Self {
        self.depth = depth;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn depth(&self) -> DepthPolicy {
        self.depth
    }

    /// The value substituted for a sensitive leaf.
    pub fn redacted(&self) -> Value {
        Value::Str(self.marker.clone().into_owned())
    }

    /// The value returned in place of a subtree past the depth bound.
    pub(crate) fn beyond_depth(&self, value: &Value) -> Value {
        match self.depth {
            DepthPolicy::FailOpen => value.clone(),
            DepthPolicy::FailClosed => self.redacted(),
        }
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::with_marker(DEFAULT_REDACTION_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::{DepthPolicy, RedactionPolicy, DEFAULT_REDACTION_MARKER};
    use crate::value::Value;

    #[test]
    fn default_policy_uses_star_and_fails_open() {
        let policy = RedactionPolicy::default();
        assert_eq!(policy.marker(), DEFAULT_REDACTION_MARKER);
        assert_eq!(policy.depth(), DepthPolicy::FailOpen);
        assert_eq!(policy.redacted(), Value::Str("*".into()));
    }

    #[test]
    fn custom_marker_is_used_verbatim() {
        let policy = RedactionPolicy::with_marker("***HIDDEN***".to_string());
        assert_eq!(policy.redacted(), Value::Str("***HIDDEN***".into()));
    }

    #[test]
    fn beyond_depth_follows_the_policy() {
        let subtree = Value::Seq(vec![Value::Str("secret".into())]);

        let open = RedactionPolicy::default();
        assert_eq!(open.beyond_depth(&subtree), subtree);

        let closed = RedactionPolicy::default().depth_policy(DepthPolicy::FailClosed);
        assert_eq!(closed.beyond_depth(&subtree), Value::Str("*".into()));
    }

    #[test]
    fn depth_policy_deserializes_from_snake_case() {
        let policy: DepthPolicy = serde_json::from_str("\"fail_closed\"").unwrap();
        assert_eq!(policy, DepthPolicy::FailClosed);
    }
}

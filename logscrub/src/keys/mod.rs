//! Sensitive field names and how they are matched.
//!
//! A [`SensitiveKeySet`] is built once per logger from [`DEFAULT_SENSITIVE_KEYS`]
//! plus any caller-supplied names, and is never mutated afterwards. Every entry
//! and every queried field name goes through [`normalize`] first, so matching
//! is insensitive to case and word-separator style.

mod normalize;

use std::{collections::HashSet, fmt};

pub use normalize::normalize;

use crate::error::OptionError;

/// Field names that are always treated as sensitive.
///
/// Entries are stored in canonical form.
pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &[
    "password",
    "email",
    "username",
    "token",
    "api_key",
    "access_token",
    "refresh_token",
    "authorization",
    "cookie",
    "session",
    "jwt",
    "bearer",
    "basic",
    "digest",
    "oauth",
    "client_id",
    "client_secret",
    "private_key",
    "public_key",
    "full_name",
    "first_name",
    "last_name",
    "phone",
    "address",
    "city",
    "state",
    "country",
    "zip",
    "postcode",
    "ssn",
    "sin",
    "nino",
    "license",
    "passport",
    "driver",
    "ssn_last4",
    "sin_last4",
    "nino_last4",
    "phone_last4",
    "card",
    "cc",
    "card_number",
    "cc_number",
    "ccn",
    "cvv",
    "cvv2",
    "cv2",
    "expiration",
    "exp_date",
    "exp_month",
    "exp_year",
    "exp",
    "birthdate",
    "birth_date",
    "birth_year",
    "birth_month",
    "birth_day",
    "birth",
    "ssn_hash",
    "sin_hash",
    "nino_hash",
    "phone_hash",
    "cvv_hash",
    "cvv2_hash",
    "cv2_hash",
    "cid",
    "customer_id",
];

/// Immutable set of canonical field names whose string values get redacted.
#[derive(Clone)]
pub struct SensitiveKeySet {
    keys: HashSet<String>,
}

impl SensitiveKeySet {
    /// Builds the set from the default denylist merged with `extra` names.
    ///
    /// Each extra name is normalized before insertion. Names that normalize to
    /// an empty string are rejected, since they could never match a field.
    pub fn with_extra<I, S>(extra: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for key in extra {
            let raw = key.as_ref();
            let canonical = normalize(raw);
            if canonical.is_empty() {
                return Err(OptionError::EmptySensitiveKey(raw.to_owned()));
            }
            set.keys.insert(canonical);
        }
        Ok(set)
    }

    /// Builds a set containing only `keys`, without the default denylist.
    ///
    /// Empty names are skipped.
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|key| normalize(key.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        Self { keys }
    }

    /// Exact membership test for an already canonical name.
    pub fn is_sensitive(&self, canonical: &str) -> bool {
        self.keys.contains(canonical)
    }

    /// Normalizes `field_name` and tests membership.
    pub fn matches(&self, field_name: &str) -> bool {
        self.is_sensitive(&normalize(field_name))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over the canonical names in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl Default for SensitiveKeySet {
    fn default() -> Self {
        Self {
            keys: DEFAULT_SENSITIVE_KEYS
                .iter()
                .map(|key| normalize(key))
                .collect(),
        }
    }
}

impl fmt::Debug for SensitiveKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.iter().collect();
        keys.sort_unstable();
        f.debug_set().entries(keys).finish()
    }
}

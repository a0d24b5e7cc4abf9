//! Redaction policy and traversal.
//!
//! - **`policy`**: what replaces a sensitive value, and what happens past the
//!   depth bound (`RedactionPolicy`, `DepthPolicy`)
//! - **`redact`**: the deep copy that applies it (`Redactor`)
//!
//! Which names are sensitive lives in `crate::keys`.

mod policy;
mod redact;

pub use policy::{DepthPolicy, RedactionPolicy, DEFAULT_REDACTION_MARKER, MAX_DEPTH};
pub use redact::{redact, Redactor};

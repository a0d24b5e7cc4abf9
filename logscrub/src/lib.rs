//! Structured logging with automatic redaction of sensitive fields.
//!
//! Every attribute of every record passes through a [`Redactor`] before it
//! reaches a sink. Strings are replaced by a marker (`"*"` by default) when:
//!
//! - the name they were logged under normalizes to an entry of the
//!   [`SensitiveKeySet`] (`"apiKey"`, `"API_KEY"` and `"api-key"` all match
//!   `api_key`), or
//! - the field they live in is tagged `#[sensitive]` in a `#[derive(ToValue)]`
//!   type.
//!
//! Strings holding a JSON object are parsed, redacted entry by entry and
//! re-encoded. Redaction descends at most [`MAX_DEPTH`] levels; what happens
//! below that is chosen with [`DepthPolicy`].
//!
//! Non-string scalars (numbers, booleans) are never replaced, even under a
//! sensitive name. Embedded documents are the exception: an entry of the
//! document under a sensitive key is replaced whole, whatever its type.
//!
//! ```rust
//! use logscrub::{attrs, Context, Logger, ToValue};
//!
//! #[derive(ToValue)]
//! struct Signup {
//!     #[serde(rename = "userEmail")]
//!     email: String,
//!     #[sensitive]
//!     invite_code: String,
//!     plan: String,
//! }
//!
//! let logger = Logger::builder().source("accounts").writer(std::io::sink()).build()?;
//! let signup = Signup {
//!     email: "dana@example.com".into(),
//!     invite_code: "XK-1".into(),
//!     plan: "team".into(),
//! };
//! logger.info(&Context::background(), "signup", attrs!["signup" => signup])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The `slog` feature adds [`slog::SlogHandler`], a sink that forwards
//! censored records into an `slog::Logger`.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use logscrub_derive::ToValue;

#[allow(unused_extern_crates)]
extern crate self as logscrub;

// Module declarations
mod config;
mod context;
mod error;
mod handler;
mod keys;
mod logger;
mod record;
mod redaction;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

// Re-exports
pub use config::Config;
pub use context::{Context, REQUEST_ID_KEY};
pub use error::{BuildError, ConfigError, HandlerError, OptionError, ParseLevelError};
pub use handler::{Handler, JsonHandler, RedactingHandler};
pub use keys::{normalize, SensitiveKeySet, DEFAULT_SENSITIVE_KEYS};
pub use logger::{Destination, Logger, LoggerBuilder};
pub use record::{Attr, Level, Record};
pub use redaction::{
    redact, DepthPolicy, RedactionPolicy, Redactor, DEFAULT_REDACTION_MARKER, MAX_DEPTH,
};
pub use value::{Field, StructStyle, StructValue, ToValue, Value, VariantValue};

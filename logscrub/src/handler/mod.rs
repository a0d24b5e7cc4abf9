//! Record sinks.
//!
//! A [`Handler`] receives finished records. [`RedactingHandler`] sits in front
//! of another handler and censors attributes before forwarding them;
//! [`JsonHandler`] writes one JSON line per record.
//!
//! Handlers are immutable once built. Binding attributes or opening a group
//! derives a new handler rather than changing the existing one, so a handler
//! may be shared across threads behind an `Arc` without locking.

mod json;
mod redacting;

use std::sync::Arc;

pub use json::JsonHandler;
pub use redacting::RedactingHandler;

use crate::{
    context::Context,
    error::HandlerError,
    record::{Attr, Level, Record},
};

/// A destination for log records.
pub trait Handler: Send + Sync {
    /// Whether records at `level` would be handled.
    fn enabled(&self, level: Level) -> bool;

    /// Processes one record.
    ///
    /// `ctx` carries the ambient attributes of the calling scope. Sinks may
    /// ignore it when a layer above has already merged those attributes into
    /// the record.
    fn handle(&self, ctx: &Context, record: &Record) -> Result<(), HandlerError>;

    /// Derives a handler that includes `attrs` in every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// Derives a handler that nests later attributes under `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

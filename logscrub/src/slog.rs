//! Forwarding censored records into `slog`.
//!
//! [`SlogHandler`] is a sink: put it behind a
//! [`RedactingHandler`](crate::RedactingHandler) (or build a logger with
//! [`Destination::Handler`](crate::Destination::Handler)) and every record
//! reaches the `slog::Logger` already censored.
//!
//! Scalars are emitted with the matching `emit_*` call. Composite values
//! (sequences, maps, records, variants, groups) are emitted as nested values
//! through `slog::Serde`, so drains with nested-value support see structured
//! data rather than a pre-rendered string.

use std::sync::Arc;

use slog::{BorrowedKV, Key, OwnedKV, RecordStatic, Serializer, KV};

use crate::{
    context::Context,
    error::HandlerError,
    handler::Handler,
    record::{Attr, Level, Record},
    value::Value,
};

static DEBUG: RecordStatic<'static> = slog::record_static!(slog::Level::Debug, "");
static INFO: RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
static WARN: RecordStatic<'static> = slog::record_static!(slog::Level::Warning, "");
static ERROR: RecordStatic<'static> = slog::record_static!(slog::Level::Error, "");

fn record_static(level: Level) -> &'static RecordStatic<'static> {
    match level {
        Level::Debug => &DEBUG,
        Level::Info => &INFO,
        Level::Warn => &WARN,
        Level::Error => &ERROR,
    }
}

/// A [`Handler`] that logs through an `slog::Logger`.
///
/// Bound attributes become a child logger's owned values. Open groups nest
/// later attributes as nested values under the group key.
#[derive(Clone)]
pub struct SlogHandler {
    logger: slog::Logger,
    level: Level,
    groups: Vec<String>,
}

impl SlogHandler {
    pub fn new(logger: slog::Logger, level: Level) -> Self {
        Self {
            logger,
            level,
            groups: Vec::new(),
        }
    }

    /// Wraps `attrs` in the currently open groups, innermost last.
    fn grouped(&self, attrs: Vec<Attr>) -> Vec<Attr> {
        self.groups
            .iter()
            .rev()
            .fold(attrs, |inner, group| vec![Attr::group(group.clone(), inner)])
    }
}

impl Handler for SlogHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<(), HandlerError> {
        let mut attrs = Vec::with_capacity(record.attrs.len() + 1);
        if let Some(location) = record.location {
            attrs.push(Attr::from_value(
                "caller",
                Value::Map(vec![
                    ("file".to_owned(), Value::from(location.file())),
                    ("line".to_owned(), Value::U64(u64::from(location.line()))),
                ]),
            ));
        }
        attrs.extend(self.grouped(record.attrs.clone()));
        let kv = AttrKv(attrs);

        self.logger.log(&slog::Record::new(
            record_static(record.level),
            &format_args!("{}", record.message),
            BorrowedKV(&kv),
        ));
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let owned = AttrKv(self.grouped(attrs));
        Arc::new(Self {
            logger: self.logger.new(OwnedKV(owned)),
            level: self.level,
            groups: self.groups.clone(),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.groups.push(name.to_owned());
        }
        Arc::new(derived)
    }
}

/// An attribute list as `slog` key-value pairs.
struct AttrKv(Vec<Attr>);

impl KV for AttrKv {
    fn serialize(&self, record: &slog::Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
        self.0
            .iter()
            .try_for_each(|attr| emit(attr, record, serializer))
    }
}

fn emit(attr: &Attr, record: &slog::Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
    let key = Key::from(attr.key.clone());
    match &attr.value {
        Value::Null => serializer.emit_unit(key),
        Value::Bool(value) => serializer.emit_bool(key, *value),
        Value::I64(value) => serializer.emit_i64(key, *value),
        Value::U64(value) => serializer.emit_u64(key, *value),
        Value::F64(value) => serializer.emit_f64(key, *value),
        Value::Str(value) | Value::Opaque(value) => serializer.emit_str(key, value),
        Value::Optional(None) => serializer.emit_none(key),
        Value::Group(members) if members.is_empty() => Ok(()),
        composite => {
            let nested = slog::Serde(composite.to_json());
            slog::Value::serialize(&nested, record, key, serializer)
        }
    }
}

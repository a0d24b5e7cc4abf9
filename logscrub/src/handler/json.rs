use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

use chrono::SecondsFormat;
use parking_lot::Mutex;
use serde_json::{Map, Value as JsonValue};

use super::Handler;
use crate::{
    context::Context,
    error::HandlerError,
    record::{Attr, Level, Record},
    value::Value,
};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Keys written by the handler itself. Attributes under these names are
/// written as `fields.<key>`.
const HEADER_KEYS: &[&str] = &["time", "level", "msg", "caller"];

/// Writes each record as one JSON object per line.
///
/// The object starts with `time`, `level` and `msg`, then `caller` when a call
/// site was captured, then bound attributes and the record's own attributes.
/// An attribute named like one of the header keys is written as
/// `fields.<key>` instead of replacing it.
/// Open groups nest later attributes; groups left empty are omitted.
///
/// Each line reaches the writer in a single `write_all` under a lock, so
/// records from concurrent callers never interleave.
#[derive(Clone)]
pub struct JsonHandler {
    writer: SharedWriter,
    level: Level,
    bound: Map<String, JsonValue>,
    groups: Vec<String>,
}

impl JsonHandler {
    pub fn new<W>(writer: W, level: Level) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            level,
            bound: Map::new(),
            groups: Vec::new(),
        }
    }

    pub fn stdout(level: Level) -> Self {
        Self::new(io::stdout(), level)
    }

    pub fn stderr(level: Level) -> Self {
        Self::new(io::stderr(), level)
    }

    fn encode(&self, record: &Record) -> Result<Vec<u8>, HandlerError> {
        let mut object = Map::new();
        object.insert(
            "time".to_owned(),
            JsonValue::String(record.time.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        object.insert(
            "level".to_owned(),
            JsonValue::String(record.level.as_str().to_owned()),
        );
        object.insert(
            "msg".to_owned(),
            JsonValue::String(record.message.clone()),
        );
        if let Some(location) = record.location {
            let mut caller = Map::new();
            caller.insert("file".to_owned(), location.file().into());
            caller.insert("line".to_owned(), location.line().into());
            object.insert("caller".to_owned(), JsonValue::Object(caller));
        }

        let mut attrs = self.bound.clone();
        insert_under(&mut attrs, &self.groups, &record.attrs);
        for (key, value) in attrs {
            if HEADER_KEYS.contains(&key.as_str()) {
                object.insert(format!("fields.{key}"), value);
            } else {
                object.insert(key, value);
            }
        }

        let mut line = serde_json::to_vec(&JsonValue::Object(object))?;
        line.push(b'\n');
        Ok(line)
    }
}

impl fmt::Debug for JsonHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonHandler")
            .field("level", &self.level)
            .field("bound", &self.bound)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<(), HandlerError> {
        let line = self.encode(record)?;
        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        insert_under(&mut derived.bound, &self.groups, &attrs);
        Arc::new(derived)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.groups.push(name.to_owned());
        }
        Arc::new(derived)
    }
}

/// Inserts `attrs` into the object reached by following `path`, creating the
/// intermediate objects. Objects along the path that end up empty are removed.
fn insert_under(object: &mut Map<String, JsonValue>, path: &[String], attrs: &[Attr]) {
    let Some((head, rest)) = path.split_first() else {
        for attr in attrs {
            insert_attr(object, attr);
        }
        return;
    };
    let entry = object
        .entry(head.clone())
        .or_insert_with(|| JsonValue::Object(Map::new()));
    if !entry.is_object() {
        *entry = JsonValue::Object(Map::new());
    }
    let emptied = match entry {
        JsonValue::Object(child) => {
            insert_under(child, rest, attrs);
            child.is_empty()
        }
        _ => false,
    };
    if emptied {
        object.remove(head);
    }
}

fn insert_attr(object: &mut Map<String, JsonValue>, attr: &Attr) {
    match &attr.value {
        Value::Group(members) if members.is_empty() => {}
        // A group without a key is inlined into its parent.
        Value::Group(members) if attr.key.is_empty() => {
            for member in members {
                insert_attr(object, member);
            }
        }
        Value::Group(members) => insert_under(object, std::slice::from_ref(&attr.key), members),
        _ if attr.key.is_empty() => {}
        value => {
            object.insert(attr.key.clone(), value.to_json());
        }
    }
}

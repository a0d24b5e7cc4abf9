use std::sync::Arc;

use super::Handler;
use crate::{
    context::Context,
    error::HandlerError,
    record::{Attr, Level, Record},
    redaction::Redactor,
    value::Value,
};

/// Censors every attribute of every record before handing it to the wrapped
/// handler.
///
/// Ambient context attributes come first, followed by the record's own. Group
/// attributes are opened up and each member is censored under its own key,
/// then regrouped under the original group key.
///
/// With debug mode on, attributes are forwarded verbatim. Never enable it
/// outside local development.
#[derive(Clone)]
pub struct RedactingHandler {
    inner: Arc<dyn Handler>,
    redactor: Arc<Redactor>,
    debug: bool,
}

impl RedactingHandler {
    pub fn new(inner: Arc<dyn Handler>, redactor: Redactor) -> Self {
        Self {
            inner,
            redactor: Arc::new(redactor),
            debug: false,
        }
    }

    #[must_use]
    pub fn with_debug_mode(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn censor(&self, attr: &Attr) -> Attr {
        if self.debug {
            return attr.clone();
        }
        match &attr.value {
            Value::Group(members) => Attr::group(
                attr.key.clone(),
                members.iter().map(|member| self.censor(member)).collect(),
            ),
            _ => self.redactor.redact_attr(attr),
        }
    }

    fn derive(&self, inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Self {
            inner,
            redactor: Arc::clone(&self.redactor),
            debug: self.debug,
        })
    }
}

impl Handler for RedactingHandler {
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn handle(&self, ctx: &Context, record: &Record) -> Result<(), HandlerError> {
        let attrs = ctx
            .attrs()
            .iter()
            .chain(&record.attrs)
            .map(|attr| self.censor(attr))
            .collect();
        self.inner.handle(ctx, &record.with_replaced_attrs(attrs))
    }

    // Bound attributes are censored once here instead of on every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let attrs = attrs.iter().map(|attr| self.censor(attr)).collect();
        self.derive(self.inner.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.derive(self.inner.with_group(name))
    }
}

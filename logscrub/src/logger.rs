//! The logging call surface and its construction options.
//!
//! ```rust
//! use logscrub::{attrs, Context, Level, Logger};
//!
//! let logger = Logger::builder()
//!     .env("development")
//!     .source("billing-api")
//!     .level(Level::Info)
//!     .sensitive_keys(["account_ref"])
//!     .writer(std::io::sink())
//!     .build()?;
//!
//! let ctx = Context::background().with_request_id("req-42");
//! logger.info(&ctx, "charge created", attrs!["account_ref" => "AC-991", "cents" => 1250_u64])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{borrow::Cow, fmt, io::Write, panic::Location, sync::Arc};

use crate::{
    context::Context,
    error::{BuildError, HandlerError, OptionError},
    handler::{Handler, JsonHandler, RedactingHandler},
    keys::SensitiveKeySet,
    record::{Attr, Level, Record},
    redaction::{DepthPolicy, RedactionPolicy, Redactor, DEFAULT_REDACTION_MARKER},
};

/// Where a built logger sends its records.
#[derive(Default)]
pub enum Destination {
    #[default]
    Stdout,
    Stderr,
    /// JSON lines written to any writer.
    Writer(Box<dyn Write + Send>),
    /// A caller-supplied sink. Records are censored before they reach it.
    Handler(Arc<dyn Handler>),
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Writer(_) => f.write_str("Writer(..)"),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// Collects construction options for a [`Logger`].
///
/// Options are only checked in [`build`](Self::build), which either returns a
/// fully configured logger or the first option that failed.
#[derive(Debug)]
pub struct LoggerBuilder {
    env: String,
    source: String,
    level: Level,
    add_source: bool,
    sensitive_keys: Vec<String>,
    debug_mode: bool,
    marker: Cow<'static, str>,
    depth_policy: DepthPolicy,
    destination: Destination,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            env: String::new(),
            source: String::new(),
            level: Level::Debug,
            add_source: false,
            sensitive_keys: Vec::new(),
            debug_mode: false,
            marker: Cow::Borrowed(DEFAULT_REDACTION_MARKER),
            depth_policy: DepthPolicy::default(),
            destination: Destination::default(),
        }
    }
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deployment environment, bound to every record as `env`.
    #[must_use]
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = env.into();
        self
    }

    /// Emitting application, bound to every record as `source`.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Minimum level; records below it are dropped before redaction.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Records the call site of each log call.
    #[must_use]
    pub fn add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    /// Extra field names merged into the default denylist. Replaces any
    /// previously supplied list.
    #[must_use]
    pub fn sensitive_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Disables redaction entirely. For local development only.
    #[must_use]
    pub fn debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    #[must_use]
    pub fn redaction_marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        self.marker = marker.into();
        self
    }

    #[must_use]
    pub fn depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    #[must_use]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Shorthand for `destination(Destination::Writer(..))`.
    #[must_use]
    pub fn writer<W>(self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.destination(Destination::Writer(Box::new(writer)))
    }

    /// Shorthand for `destination(Destination::Handler(..))`.
    #[must_use]
    pub fn handler(self, handler: Arc<dyn Handler>) -> Self {
        self.destination(Destination::Handler(handler))
    }

    pub fn build(self) -> Result<Logger, BuildError> {
        if self.marker.is_empty() {
            return Err(BuildError::option(
                "redaction_marker",
                OptionError::EmptyRedactionMarker,
            ));
        }
        let keys = SensitiveKeySet::with_extra(&self.sensitive_keys)
            .map_err(|source| BuildError::option("sensitive_keys", source))?;
        let policy = RedactionPolicy::with_marker(self.marker).depth_policy(self.depth_policy);

        let sink: Arc<dyn Handler> = match self.destination {
            Destination::Stdout => Arc::new(JsonHandler::stdout(self.level)),
            Destination::Stderr => Arc::new(JsonHandler::stderr(self.level)),
            Destination::Writer(writer) => Arc::new(JsonHandler::new(writer, self.level)),
            Destination::Handler(handler) => handler,
        };
        let redacting =
            RedactingHandler::new(sink, Redactor::new(keys, policy)).with_debug_mode(self.debug_mode);

        let logger = Logger {
            handler: Arc::new(redacting),
            level: self.level,
            add_source: self.add_source,
        };
        Ok(logger.with(vec![
            Attr::new("source", &self.source),
            Attr::new("env", &self.env),
        ]))
    }
}

/// A cheaply cloned handle for emitting records.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    level: Level,
    add_source: bool,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Logs straight into `handler`, with no level floor of its own and no
    /// redaction unless `handler` provides it.
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            level: Level::Debug,
            add_source: false,
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level && self.handler.enabled(level)
    }

    /// Derives a logger that adds `attrs` to every record.
    #[must_use]
    pub fn with(&self, attrs: Vec<Attr>) -> Self {
        Self {
            handler: self.handler.with_attrs(attrs),
            ..self.clone()
        }
    }

    /// Derives a logger that nests later attributes under `name`.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            ..self.clone()
        }
    }

    /// Emits one record. Disabled levels return `Ok(())` without doing any
    /// work. Sink failures are returned as-is.
    #[track_caller]
    pub fn log(
        &self,
        ctx: &Context,
        level: Level,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), HandlerError> {
        if !self.enabled(level) {
            return Ok(());
        }
        let mut record = Record::new(level, message).with_attrs(attrs);
        if self.add_source {
            record = record.with_location(Location::caller());
        }
        self.handler.handle(ctx, &record)
    }

    #[track_caller]
    pub fn debug(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), HandlerError> {
        self.log(ctx, Level::Debug, message, attrs)
    }

    #[track_caller]
    pub fn info(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), HandlerError> {
        self.log(ctx, Level::Info, message, attrs)
    }

    #[track_caller]
    pub fn warn(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), HandlerError> {
        self.log(ctx, Level::Warn, message, attrs)
    }

    #[track_caller]
    pub fn error(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), HandlerError> {
        self.log(ctx, Level::Error, message, attrs)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .finish_non_exhaustive()
    }
}

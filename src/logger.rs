//! Structured JSON logger factory.
//!
//! A [`Logger`] is a self-contained `tracing` dispatcher that writes one JSON
//! object per record, synchronously, to its configured sink. It is not tied
//! to the global subscriber, so every handler may carry its own logger.
//!
//! Per-request correlation uses a `request` span with an `id` field; every
//! record emitted inside it carries `"span":{"id":..,"name":"request"}`.
use std::io;

use tracing::{dispatcher, Dispatch, Level, Span};
use tracing_subscriber::fmt::{writer::BoxMakeWriter, MakeWriter};
use uuid::Uuid;

// ---

/// Logger construction options.
///
/// Defaults: no call-site info, `INFO` level, standard output.
pub struct Options {
    source: bool,
    level: Level,
    writer: BoxMakeWriter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: false,
            level: Level::INFO,
            writer: BoxMakeWriter::new(io::stdout),
        }
    }
}

impl Options {
    /// Attach file and line of the call site to every record.
    pub fn with_source(mut self, source: bool) -> Self {
        self.source = source;
        self
    }

    /// Minimum severity that is emitted.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Output destination.
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = BoxMakeWriter::new(writer);
        self
    }

    pub fn build(self) -> Logger {
        // ---
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(false)
            .with_file(self.source)
            .with_line_number(self.source)
            .with_max_level(self.level)
            .with_writer(self.writer)
            .finish();

        Logger {
            dispatch: Dispatch::new(subscriber),
        }
    }
}

/// A leveled JSON logger. Cheap to clone; clones share the same sink.
#[derive(Clone, Debug)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Default for Logger {
    fn default() -> Self {
        Options::default().build()
    }
}

impl Logger {
    pub fn new(options: Options) -> Self {
        options.build()
    }

    /// Run `f` with this logger as the current dispatcher.
    ///
    /// `tracing` macros invoked inside `f` are routed to this logger.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Open the correlation group for one request.
    pub fn request_span(&self, id: Uuid) -> Span {
        // ERROR is the most severe level, so the span survives any level filter.
        self.in_scope(|| tracing::span!(Level::ERROR, "request", id = %id))
    }

    /// Run `f` inside `span` with this logger as the current dispatcher.
    pub fn in_span<T>(&self, span: &Span, f: impl FnOnce() -> T) -> T {
        self.in_scope(|| span.in_scope(f))
    }

    /// Install this logger as the process-wide default subscriber.
    pub fn install_global(&self) -> anyhow::Result<()> {
        dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| anyhow::anyhow!("Failed to install global logger: {}", e))
    }
}

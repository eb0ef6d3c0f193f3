//! Subscriber setup and the diagnostics layer

use crate::diagnostics::Diagnostics;
use crate::reload::{ReloadHandle, level_filter};
use dto2ts_core::{GenerateError, GenerateResult, LogLevel};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, reload};

/// Tracing layer that tallies warn and error events into [`Diagnostics`]
pub struct DiagnosticsLayer {
    diagnostics: &'static Diagnostics,
}

impl DiagnosticsLayer {
    /// Create a layer feeding the global diagnostics
    pub fn new() -> Self {
        Self {
            diagnostics: Diagnostics::global(),
        }
    }

    /// Create a layer feeding a specific diagnostics instance
    pub fn with_diagnostics(diagnostics: &'static Diagnostics) -> Self {
        Self { diagnostics }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for DiagnosticsLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for DiagnosticsLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());
        if level < LogLevel::Warn {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.diagnostics.record(
            level,
            metadata.target(),
            &visitor.message.unwrap_or_default(),
        );
    }
}

/// Pulls the `message` field, falling back to the first field recorded
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(value.to_string());
        }
    }
}

/// Install the global subscriber.
///
/// Output goes to stderr so generated TypeScript on stdout stays clean.
/// `RUST_LOG`, when set and valid, replaces `level` as the filter. The level
/// can be changed later through [`ReloadHandle::global`].
pub fn init_logging(level: LogLevel) -> GenerateResult<()> {
    use tracing_subscriber::prelude::*;

    let env_filter = std::env::var_os(EnvFilter::DEFAULT_ENV)
        .and_then(|_| EnvFilter::try_from_default_env().ok());
    // RUST_LOG takes over; the level filter then lets everything through
    let level = if env_filter.is_some() {
        LogLevel::Trace
    } else {
        level
    };
    let (filter, handle) = reload::Layer::new(level_filter(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(DiagnosticsLayer::new());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GenerateError::ConfigError(format!("logging already initialized: {e}")))?;
    ReloadHandle::global().set_handle(handle, level);
    Ok(())
}

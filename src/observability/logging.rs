//! Structured logger.
//!
//! # Responsibilities
//! - Filter messages by minimum severity
//! - Merge instance context, message fields, timestamp and severity
//! - Render JSON (production) or styled text (development)
//! - Format HTTP access-log entries
//!
//! # Design Decisions
//! - Level and mode live in atomics so a shared `Arc<Logger>` can be
//!   reconfigured without locking
//! - Production mode is read from `APP_ENV` once, at construction
//! - Output goes through a [`Sink`] and time comes from a [`Clock`]

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::observability::clock::{format_timestamp, Clock, SystemClock};
use crate::observability::message::{ErrorReport, Fields, LogContext, Message};
use crate::observability::render::{access_line, render_human, render_json};
use crate::observability::severity::Severity;
use crate::observability::sink::{ConsoleSink, Sink, Stream};

/// Environment variable selecting the output format.
pub const ENV_VAR: &str = "APP_ENV";

/// Value of [`ENV_VAR`] that enables production (JSON) output.
pub const PRODUCTION: &str = "production";

/// Stored level meaning "no threshold".
const LEVEL_UNSET: u8 = 0;

/// Whether `APP_ENV` currently selects production output.
pub fn production_from_env() -> bool {
    is_production_value(std::env::var(ENV_VAR).ok().as_deref())
}

fn is_production_value(value: Option<&str>) -> bool {
    value == Some(PRODUCTION)
}

/// One completed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestRecord {
    /// Milliseconds between request start and completion.
    pub elapsed_time: u64,
    pub url: String,
    pub method: String,
    pub status_code: u16,
    /// Name of the component that handled the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Severity-filtered logger with JSON and human-readable output.
pub struct Logger {
    context: LogContext,
    level: AtomicU8,
    production: AtomicBool,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// Create a logger writing to the console.
    ///
    /// With no `log_level` every severity is emitted.
    pub fn new(context: impl Into<LogContext>, log_level: Option<Severity>) -> Self {
        Self::builder()
            .context(context)
            .log_level_opt(log_level)
            .build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn set_log_level(&self, level: Severity) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Remove the threshold so every severity is emitted.
    pub fn clear_log_level(&self) {
        self.level.store(LEVEL_UNSET, Ordering::Relaxed);
    }

    pub fn log_level(&self) -> Option<Severity> {
        Severity::from_repr(self.level.load(Ordering::Relaxed))
    }

    pub fn set_production_mode(&self, production: bool) {
        self.production.store(production, Ordering::Relaxed);
    }

    pub fn is_production(&self) -> bool {
        self.production.load(Ordering::Relaxed)
    }

    /// Whether a message at `severity` passes the threshold.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.log_level().map_or(true, |min| min <= severity)
    }

    /// Log at INFO. Same as [`Logger::info`].
    pub fn log(&self, message: impl Into<Message>) {
        self.emit(message.into(), Severity::Info);
    }

    pub fn debug(&self, message: impl Into<Message>) {
        self.emit(message.into(), Severity::Debug);
    }

    pub fn info(&self, message: impl Into<Message>) {
        self.emit(message.into(), Severity::Info);
    }

    pub fn warn(&self, message: impl Into<Message>) {
        self.emit(message.into(), Severity::Warn);
    }

    /// Log at ERROR. Error messages are routed through [`Logger::handle_error`].
    pub fn error(&self, message: impl Into<Message>) {
        match message.into() {
            Message::Error(report) => self.handle_error(report, Fields::new()),
            other => self.emit(other, Severity::Error),
        }
    }

    /// Log an error with its stack, merged over `context`.
    pub fn handle_error(&self, report: ErrorReport, context: Fields) {
        self.error(Message::Structured(report.into_fields(context)));
    }

    /// Log one completed HTTP request at INFO.
    pub fn handle_http_request(&self, record: &HttpRequestRecord) {
        let fields = if self.is_production() {
            match serde_json::to_value(record) {
                Ok(Value::Object(fields)) => fields,
                Ok(_) => return,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to encode access log entry");
                    return;
                }
            }
        } else {
            let mut fields = Fields::new();
            if let Some(context) = &record.context {
                fields.insert("context".to_string(), Value::String(context.clone()));
            }
            fields.insert(
                "message".to_string(),
                Value::String(access_line(
                    &record.method,
                    &record.url,
                    record.status_code,
                    record.elapsed_time,
                )),
            );
            fields
        };
        self.emit_access(fields, record.context.is_some());
    }

    fn emit(&self, message: Message, severity: Severity) {
        if !self.is_enabled(severity) {
            return;
        }
        let payload = self.build_payload(message, severity);
        self.print(payload, severity);
    }

    /// Access entries without a component clear the instance context.
    fn emit_access(&self, fields: Fields, has_context: bool) {
        if !self.is_enabled(Severity::Info) {
            return;
        }
        let mut payload = self.build_payload(Message::Structured(fields), Severity::Info);
        if !has_context {
            payload.shift_remove("context");
        }
        self.print(payload, Severity::Info);
    }

    fn build_payload(&self, message: Message, severity: Severity) -> Fields {
        let mut payload = self.context.fields().clone();
        for (key, value) in message.into_fields() {
            payload.insert(key, value);
        }
        payload.insert(
            "date".to_string(),
            Value::String(format_timestamp(&self.clock.now())),
        );
        payload.insert(
            "severity".to_string(),
            Value::String(severity.label().to_string()),
        );
        payload
    }

    fn print(&self, payload: Fields, severity: Severity) {
        let stream = if severity == Severity::Error {
            Stream::Stderr
        } else {
            Stream::Stdout
        };

        if self.is_production() {
            match render_json(&payload) {
                Ok(line) => self.sink.write_line(stream, &line),
                Err(e) => tracing::warn!(error = %e, "Failed to encode log record"),
            }
            return;
        }

        let (line, stack) = render_human(payload, severity);
        self.sink.write_line(stream, &line);
        if let Some(stack) = stack {
            self.sink.write_line(stream, &stack);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogContext::default(), None)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .field("level", &self.log_level())
            .field("production", &self.is_production())
            .finish()
    }
}

/// Builder for [`Logger`].
#[derive(Default)]
pub struct LoggerBuilder {
    context: LogContext,
    level: Option<Severity>,
    production: Option<bool>,
    sink: Option<Arc<dyn Sink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LoggerBuilder {
    pub fn context(mut self, context: impl Into<LogContext>) -> Self {
        self.context = context.into();
        self
    }

    pub fn log_level(self, level: Severity) -> Self {
        self.log_level_opt(Some(level))
    }

    pub fn log_level_opt(mut self, level: Option<Severity>) -> Self {
        self.level = level;
        self
    }

    /// Force the output format instead of reading `APP_ENV`.
    pub fn production(mut self, production: bool) -> Self {
        self.production = Some(production);
        self
    }

    pub fn production_opt(mut self, production: Option<bool>) -> Self {
        self.production = production;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            context: self.context,
            level: AtomicU8::new(self.level.map_or(LEVEL_UNSET, |l| l as u8)),
            production: AtomicBool::new(self.production.unwrap_or_else(production_from_env)),
            sink: self.sink.unwrap_or_else(|| Arc::new(ConsoleSink)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }
    }
}

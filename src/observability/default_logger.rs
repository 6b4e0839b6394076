//! Shared default logger handle.
//!
//! Owned by the composition root and handed out by `Arc`. Holds at most
//! one [`Logger`]; creates a console logger on first use when nothing was
//! installed.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::observability::logging::{HttpRequestRecord, Logger};
use crate::observability::message::{ErrorReport, Fields, Message};
use crate::observability::severity::Severity;

/// Where [`DefaultLogger::error`] sends messages.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaticErrorRouting {
    /// Same as [`Logger::error`].
    #[default]
    Error = 0,
    /// Forward to [`Logger::warn`], as older releases did.
    Warn = 1,
}

impl From<u8> for StaticErrorRouting {
    fn from(val: u8) -> Self {
        match val {
            1 => StaticErrorRouting::Warn,
            _ => StaticErrorRouting::Error,
        }
    }
}

#[derive(Default)]
pub struct DefaultLogger {
    slot: ArcSwapOption<Logger>,
    error_routing: AtomicU8,
}

impl DefaultLogger {
    /// An empty handle. The first call that needs a logger creates one.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(logger: Arc<Logger>) -> Self {
        let handle = Self::new();
        handle.set_instance(logger);
        handle
    }

    /// Replace the held logger.
    pub fn set_instance(&self, logger: Arc<Logger>) {
        self.slot.store(Some(logger));
    }

    /// Install `logger` only if none is held yet. Returns the held logger.
    pub fn adopt(&self, logger: Arc<Logger>) -> Arc<Logger> {
        let previous = self
            .slot
            .compare_and_swap(&None::<Arc<Logger>>, Some(Arc::clone(&logger)));
        (*previous).clone().unwrap_or(logger)
    }

    /// The held logger, created with defaults if absent.
    pub fn instance(&self) -> Arc<Logger> {
        if let Some(logger) = self.slot.load_full() {
            return logger;
        }
        tracing::debug!("No default logger installed, creating one");
        self.adopt(Arc::new(Logger::default()))
    }

    pub fn is_installed(&self) -> bool {
        self.slot.load().is_some()
    }

    pub fn set_error_routing(&self, routing: StaticErrorRouting) {
        self.error_routing.store(routing as u8, Ordering::Relaxed);
    }

    pub fn error_routing(&self) -> StaticErrorRouting {
        StaticErrorRouting::from(self.error_routing.load(Ordering::Relaxed))
    }

    pub fn set_log_level(&self, level: Severity) {
        self.instance().set_log_level(level);
    }

    pub fn set_production_mode(&self, production: bool) {
        self.instance().set_production_mode(production);
    }

    pub fn log(&self, message: impl Into<Message>) {
        self.instance().log(message);
    }

    pub fn debug(&self, message: impl Into<Message>) {
        self.instance().debug(message);
    }

    pub fn info(&self, message: impl Into<Message>) {
        self.instance().info(message);
    }

    pub fn warn(&self, message: impl Into<Message>) {
        self.instance().warn(message);
    }

    pub fn error(&self, message: impl Into<Message>) {
        let logger = self.instance();
        match self.error_routing() {
            StaticErrorRouting::Error => logger.error(message),
            StaticErrorRouting::Warn => logger.warn(message),
        }
    }

    pub fn handle_error(&self, report: ErrorReport, context: Fields) {
        self.instance().handle_error(report, context);
    }

    pub fn handle_http_request(&self, record: &HttpRequestRecord) {
        self.instance().handle_http_request(record);
    }
}

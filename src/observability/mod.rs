//! Logging subsystem.
//!
//! # Data Flow
//! ```text
//! caller message (text | fields | error)
//!     → message.rs (normalize into fields)
//!     → logging.rs (filter by severity, merge context, stamp date)
//!     → render.rs (JSON line or styled text)
//!     → sink.rs (stdout / stderr)
//! ```
//!
//! # Design Decisions
//! - JSON format for production, styled text for development
//! - Shared logger is an explicit handle, not a hidden global
//! - Library diagnostics go through `tracing`, not through the logger

pub mod clock;
pub mod default_logger;
pub mod logging;
pub mod message;
pub mod render;
pub mod severity;
pub mod sink;

pub use default_logger::{DefaultLogger, StaticErrorRouting};
pub use logging::{HttpRequestRecord, Logger, LoggerBuilder};
pub use message::{ErrorReport, Fields, LogContext, Message};
pub use severity::{ParseSeverityError, Severity};
pub use sink::{ConsoleSink, MemorySink, Sink, Stream};

//! Structured logging and HTTP access-log middleware.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;

pub use config::AppConfig;
pub use error::HttpFailure;
pub use http::{HttpServer, LoggingInterceptor, LoggingLayer};
pub use observability::{DefaultLogger, Logger, Message, Severity};

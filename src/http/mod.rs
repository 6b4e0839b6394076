//! HTTP access logging.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → middleware/logging.rs (tower layer, starts the clock)
//!     → request.rs (normalize url / method / component)
//!     → inner service (handler)
//!     → response.rs (status from response or failure)
//!     → interceptor.rs (one access-log entry per request)
//! ```

pub mod interceptor;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use interceptor::LoggingInterceptor;
pub use middleware::{LoggingLayer, LoggingService};
pub use request::RequestLine;
pub use response::{FailureStatus, ResponseStatus};
pub use server::HttpServer;

//! Status extraction from handler outcomes.
//!
//! # Responsibilities
//! - Read the status code of a completed response
//! - Read the status a failure carries, if any
//!
//! # Design Decisions
//! - Failures without a status are logged as 500 by the interceptor
//! - Boxed errors are searched along their source chain

use std::convert::Infallible;
use std::error::Error as StdError;

use axum::http::Response;

use crate::error::HttpFailure;

/// Status used when a failure carries none.
pub const DEFAULT_FAILURE_STATUS: u16 = 500;

/// A successful outcome with a status code.
pub trait ResponseStatus {
    fn status_code(&self) -> u16;
}

impl<B> ResponseStatus for Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}

/// A failed outcome that may carry a status code.
pub trait FailureStatus {
    fn status_code(&self) -> Option<u16>;
}

impl FailureStatus for Infallible {
    fn status_code(&self) -> Option<u16> {
        match *self {}
    }
}

impl FailureStatus for HttpFailure {
    fn status_code(&self) -> Option<u16> {
        Some(self.status.as_u16())
    }
}

impl FailureStatus for tower::BoxError {
    fn status_code(&self) -> Option<u16> {
        let root: &(dyn StdError + 'static) = &**self;
        let mut current = Some(root);
        while let Some(err) = current {
            if let Some(failure) = err.downcast_ref::<HttpFailure>() {
                return Some(failure.status.as_u16());
            }
            current = err.source();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[derive(Debug, thiserror::Error)]
    #[error("handler failed")]
    struct Wrapped(#[source] HttpFailure);

    #[test]
    fn test_response_status() {
        let response = Response::builder().status(201).body(()).unwrap();
        assert_eq!(ResponseStatus::status_code(&response), 201);
    }

    #[test]
    fn test_boxed_failure_status() {
        let boxed: tower::BoxError = Box::new(HttpFailure::new(StatusCode::FORBIDDEN, "no"));
        assert_eq!(FailureStatus::status_code(&boxed), Some(403));

        let nested: tower::BoxError = Box::new(Wrapped(HttpFailure::not_found("gone")));
        assert_eq!(FailureStatus::status_code(&nested), Some(404));

        let plain: tower::BoxError = "timeout".into();
        assert_eq!(FailureStatus::status_code(&plain), None);
    }
}

//! Access logging around one request-handling call.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::http::request::RequestLine;
use crate::http::response::{FailureStatus, ResponseStatus, DEFAULT_FAILURE_STATUS};
use crate::observability::{HttpRequestRecord, Logger};

/// Times a request handler and writes one access-log entry per call.
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    logger: Arc<Logger>,
}

impl LoggingInterceptor {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Run `next` and log its outcome.
    ///
    /// Failures are logged with their carried status (500 if none) and
    /// returned unchanged.
    pub async fn intercept<F, Fut, T, E>(&self, request: RequestLine, next: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: ResponseStatus,
        E: FailureStatus,
    {
        let started = Instant::now();
        let outcome = next().await;
        let elapsed_time = started.elapsed().as_millis() as u64;

        let status_code = match &outcome {
            Ok(response) => response.status_code(),
            Err(failure) => failure.status_code().unwrap_or(DEFAULT_FAILURE_STATUS),
        };

        self.logger.handle_http_request(&HttpRequestRecord {
            elapsed_time,
            url: request.url,
            method: request.method,
            status_code,
            context: request.component,
        });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpFailure;
    use crate::observability::MemorySink;
    use axum::http::{Response, StatusCode};
    use serde_json::Value;
    use std::time::Duration;

    fn interceptor() -> (LoggingInterceptor, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder().production(true).sink(sink.clone()).build();
        (LoggingInterceptor::new(Arc::new(logger)), sink)
    }

    fn records(sink: &MemorySink) -> Vec<Value> {
        sink.lines()
            .iter()
            .map(|(_, line)| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn request() -> RequestLine {
        RequestLine::new("GET", "/users/7", Some("UsersController".into()))
    }

    #[tokio::test]
    async fn test_success_logs_once() {
        let (interceptor, sink) = interceptor();
        let outcome = interceptor
            .intercept(request(), || async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok::<_, HttpFailure>(Response::builder().status(201).body(()).unwrap())
            })
            .await;

        assert_eq!(outcome.unwrap().status(), StatusCode::CREATED);
        let records = records(&sink);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["statusCode"], 201);
        assert_eq!(records[0]["url"], "/users/7");
        assert_eq!(records[0]["method"], "GET");
        assert_eq!(records[0]["context"], "UsersController");
        assert!(records[0]["elapsedTime"].as_u64().unwrap() >= 5);
    }

    #[tokio::test]
    async fn test_failure_status_is_logged_and_error_returned() {
        let (interceptor, sink) = interceptor();
        let outcome = interceptor
            .intercept(request(), || async {
                Err::<Response<()>, _>(HttpFailure::new(StatusCode::FORBIDDEN, "denied"))
            })
            .await;

        let failure = outcome.unwrap_err();
        assert_eq!(failure.status, StatusCode::FORBIDDEN);
        assert_eq!(failure.message, "denied");

        let records = records(&sink);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["statusCode"], 403);
    }

    #[tokio::test]
    async fn test_failure_without_status_defaults_to_500() {
        let (interceptor, sink) = interceptor();
        let outcome = interceptor
            .intercept(request(), || async {
                Err::<Response<()>, tower::BoxError>("connection reset".into())
            })
            .await;

        assert_eq!(outcome.unwrap_err().to_string(), "connection reset");
        let records = records(&sink);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["statusCode"], 500);
    }

    #[tokio::test]
    async fn test_continuation_runs_after_start() {
        let (interceptor, sink) = interceptor();
        let outcome: Result<Response<()>, HttpFailure> = interceptor
            .intercept(request(), || {
                assert!(sink.is_empty());
                async { Ok(Response::new(())) }
            })
            .await;
        assert!(outcome.is_ok());
        assert_eq!(sink.lines().len(), 1);
    }
}

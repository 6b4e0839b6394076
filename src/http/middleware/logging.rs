//! Access-log middleware.
//! Wraps any `http` service with a [`LoggingInterceptor`].

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::interceptor::LoggingInterceptor;
use crate::http::request::RequestLine;
use crate::http::response::FailureStatus;
use crate::observability::Logger;

/// Layer producing [`LoggingService`].
#[derive(Debug, Clone)]
pub struct LoggingLayer {
    interceptor: Arc<LoggingInterceptor>,
    component: Option<Arc<str>>,
}

impl LoggingLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            interceptor: Arc::new(LoggingInterceptor::new(logger)),
            component: None,
        }
    }

    /// Name recorded as the handling component. Defaults to the matched route.
    pub fn component(mut self, name: impl Into<String>) -> Self {
        self.component = Some(Arc::from(name.into()));
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingService {
            inner,
            interceptor: self.interceptor.clone(),
            component: self.component.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingService<S> {
    inner: S,
    interceptor: Arc<LoggingInterceptor>,
    component: Option<Arc<str>>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for LoggingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: FailureStatus + Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // The clone is not guaranteed ready; keep the one that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let line = RequestLine::from_request(&request, self.component.as_deref());
        let interceptor = self.interceptor.clone();

        Box::pin(async move {
            interceptor
                .intercept(line, move || inner.call(request))
                .await
        })
    }
}

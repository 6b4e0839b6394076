//! Request normalization.
//!
//! # Responsibilities
//! - Map a transport request into the `{url, method, component}` triple
//!   the access log needs
//!
//! # Design Decisions
//! - Nested routers rewrite `uri()`; the `OriginalUri` extension holds the
//!   URL the client sent, so it wins when present
//! - The component name comes from the layer, else the matched route

use axum::extract::{MatchedPath, OriginalUri};
use axum::http::Request;

/// What the access log records about an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub url: String,
    pub method: String,
    /// Name of the component handling the request.
    pub component: Option<String>,
}

impl RequestLine {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        component: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            component,
        }
    }

    /// Normalize an `http::Request`.
    pub fn from_request<B>(request: &Request<B>, component: Option<&str>) -> Self {
        let url = match request.extensions().get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.to_string(),
            None => request.uri().to_string(),
        };
        let component = component.map(str::to_string).or_else(|| {
            request
                .extensions()
                .get::<MatchedPath>()
                .map(|path| path.as_str().to_string())
        });

        Self {
            url,
            method: request.method().to_string(),
            component,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Uri};

    #[test]
    fn test_plain_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users?page=2")
            .body(Body::empty())
            .unwrap();
        let line = RequestLine::from_request(&request, Some("UsersController"));
        assert_eq!(
            line,
            RequestLine::new("POST", "/users?page=2", Some("UsersController".into()))
        );
    }

    #[test]
    fn test_original_uri_wins() {
        let mut request = Request::builder()
            .uri("/42")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(OriginalUri(Uri::from_static("/api/users/42")));
        let line = RequestLine::from_request(&request, None);
        assert_eq!(line.url, "/api/users/42");
        assert_eq!(line.method, "GET");
        assert_eq!(line.component, None);
    }
}

//! Security Headers Middleware
//!
//! Adds browser hardening headers to every response. HSTS is only sent in
//! production, where the API sits behind TLS.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request, Response},
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};

const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

/// Header values applied to responses. Precomputed once per layer.
#[derive(Clone, Debug)]
pub struct SecurityHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaders {
    /// `hsts_max_age` of `None` leaves Strict-Transport-Security out.
    pub fn new(hsts_max_age: Option<u64>) -> Self {
        let mut headers = vec![
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static("default-src 'self'; img-src 'self' data: https:"),
            ),
            (
                PERMISSIONS_POLICY,
                HeaderValue::from_static("microphone=(), camera=()"),
            ),
        ];

        if let Some(max_age) = hsts_max_age {
            if let Ok(value) = HeaderValue::from_str(&format!("max-age={}; includeSubDomains", max_age)) {
                headers.push((header::STRICT_TRANSPORT_SECURITY, value));
            }
        }

        Self { headers }
    }

    /// One year of HSTS in production, none elsewhere.
    pub fn for_environment(is_production: bool) -> Self {
        Self::new(is_production.then_some(31_536_000))
    }
}

/// Layer that adds security headers to responses
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    headers: SecurityHeaders,
}

impl SecurityHeadersLayer {
    pub fn new(headers: SecurityHeaders) -> Self {
        Self { headers }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersMiddleware {
            inner,
            headers: self.headers.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SecurityHeadersMiddleware<S> {
    inner: S,
    headers: SecurityHeaders,
}

impl<S> Service<Request<Body>> for SecurityHeadersMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        // The clone that was polled ready must serve this call
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let headers = self.headers.clone();

        Box::pin(async move {
            let mut response = inner.call(request).await?;
            let target = response.headers_mut();
            for (name, value) in headers.headers {
                target.insert(name, value);
            }
            Ok(response)
        })
    }
}

/// Security headers for the configured environment.
pub fn create_security_headers_layer(is_production: bool) -> SecurityHeadersLayer {
    SecurityHeadersLayer::new(SecurityHeaders::for_environment(is_production))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    async fn send(layer: SecurityHeadersLayer) -> Response<Body> {
        Router::new()
            .route("/", get(|| async { "OK" }))
            .layer(layer)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn adds_headers_in_development_without_hsts() {
        let response = send(create_security_headers_layer(false)).await;
        let headers = response.headers();

        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert!(headers.get(header::CONTENT_SECURITY_POLICY).is_some());
        assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
    }

    #[tokio::test]
    async fn production_sends_hsts() {
        let response = send(create_security_headers_layer(true)).await;

        assert_eq!(
            response.headers().get(header::STRICT_TRANSPORT_SECURITY).unwrap(),
            "max-age=31536000; includeSubDomains"
        );
    }
}

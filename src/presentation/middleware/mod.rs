//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod metrics;
pub mod security;

pub use auth::{auth_middleware, optional_auth_middleware, AuthUser};
pub use metrics::track_metrics;
pub use security::{create_security_headers_layer, SecurityHeaders, SecurityHeadersLayer};

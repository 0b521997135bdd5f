//! Authentication Middleware
//!
//! Bearer token validation for protected routes. A valid token puts an
//! [`AuthUser`] into the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use crate::application::services::AuthError;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

fn authenticate(state: &AppState, request: &Request) -> Result<AuthUser, AppError> {
    let Authorization(bearer) = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let user_id = state
        .tokens
        .decode_access_token(bearer.token())
        .and_then(|claims| claims.user_id())
        .map_err(|e| match e {
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            _ => AppError::Unauthorized("Invalid token".into()),
        })?;

    Ok(AuthUser { user_id })
}

/// Reject requests without a valid access token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, &request)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Optional authentication middleware (doesn't fail if no token)
///
/// An invalid token is treated like no token at all.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &request) {
        Ok(user) => {
            request.extensions_mut().insert(user);
        }
        Err(e) => {
            if request.headers().contains_key(axum::http::header::AUTHORIZATION) {
                tracing::debug!(error = %e, "Ignoring invalid bearer token");
            }
        }
    }

    next.run(request).await
}

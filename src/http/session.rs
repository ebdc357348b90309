//! Caller identity, forwarded by the gateway.
//!
//! The service never authenticates anyone itself. An upstream gateway is
//! trusted to have done that and to forward the caller's id in the
//! `x-user-id` header; handlers that need an identity read it from there
//! and fail Unauthorized when it is absent.

use axum::http::HeaderMap;

use crate::service::ServiceError;

/// Header the gateway forwards the authenticated caller's id in.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller on a request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// Extract the caller identity from request headers.
pub fn identity_from_headers(headers: &HeaderMap) -> Result<Identity, ServiceError> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(|value| Identity {
            user_id: value.to_string(),
        })
        .ok_or_else(|| ServiceError::Unauthorized(format!("missing {} header", USER_ID_HEADER)))
}

//! Request identification.
//!
//! # Responsibilities
//! - Resolve the request ID a request is logged under
//! - Prefer an ID set by `tower_http::request_id`, then the inbound header
//! - Generate a UUID v4 when neither is present

use axum::http::{HeaderName, Request};
use tower_http::request_id::RequestId;
use uuid::Uuid;

/// Header carrying the request ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID for `req`, generating one if the request carries none.
pub fn request_id<B>(req: &Request<B>) -> String {
    let existing = req
        .extensions()
        .get::<RequestId>()
        .map(RequestId::header_value)
        .or_else(|| req.headers().get(&X_REQUEST_ID))
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    match existing {
        Some(id) => id.to_string(),
        None => {
            let id = Uuid::new_v4().to_string();
            tracing::debug!(request_id = %id, "Generated request id");
            id
        }
    }
}

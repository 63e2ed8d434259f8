//! Request ID middleware for request tracing and correlation.
//!
//! An `x-request-id` from an upstream proxy is reused when it is short,
//! printable ASCII; otherwise a UUID v4 is generated. The id is recorded on
//! the `http_request` span, tagged on the Sentry scope, and echoed in the
//! response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request id that is reused as-is.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Middleware that ensures every request carries a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|value| usable_upstream_id(value))
        .cloned()
        .unwrap_or_else(generate_request_id);

    if let Ok(id) = request_id.to_str() {
        Span::current().record("request_id", id);
        sentry::configure_scope(|scope| scope.set_tag("request_id", id));
    }
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}

fn usable_upstream_id(value: &HeaderValue) -> bool {
    let bytes = value.as_bytes();
    !bytes.is_empty()
        && bytes.len() <= MAX_UPSTREAM_ID_LEN
        && bytes.iter().all(u8::is_ascii_graphic)
}

fn generate_request_id() -> HeaderValue {
    let id = Uuid::new_v4().to_string();
    // A hyphenated UUID is always a valid header value.
    HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

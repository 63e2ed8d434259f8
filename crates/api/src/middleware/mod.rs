//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. CORS
//! 5. Request body limit (sized from the asset upload limit)
//!
//! Admin verification is an extractor ([`RequireAdmin`]), not a layer, so
//! only product mutations pay for the lookup.

pub mod auth;
pub mod request_id;

pub use auth::{ADMIN_ID_HEADER, RequireAdmin};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

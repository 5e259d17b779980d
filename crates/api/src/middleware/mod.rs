//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. CORS
//! 3. `TraceLayer` (per-request span with `request_id` and `user_id` fields)
//! 4. Request ID (fill `request_id`, echo `x-request-id`)
//! 5. User context (fill `user_id`, tag the Sentry scope)

pub mod request_id;
pub mod user;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use user::{OptionalUser, RequireUser, USER_ID_HEADER, user_context_middleware};

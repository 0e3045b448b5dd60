pub mod auth;
pub mod error_handler;
pub mod rate_limit;
pub mod request_id;

pub use auth::{hash_api_key, verify_api_key, ApiKeyAuth, API_KEY_HEADER};
pub use error_handler::{query_config, query_error_handler};
pub use rate_limit::RateLimiter;
pub use request_id::{CorrelationId, RequestId, REQUEST_ID_HEADER};

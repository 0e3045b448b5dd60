use actix_web::{error::QueryPayloadError, Error, HttpRequest};

use crate::core::AppError;

/// Route query-string extraction failures into the standard error envelope
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected malformed query string");
    AppError::validation(format!("Invalid query parameters: {}", err)).into()
}

/// Query extractor configuration shared by every report route
pub fn query_config() -> actix_web::web::QueryConfig {
    actix_web::web::QueryConfig::default().error_handler(query_error_handler)
}

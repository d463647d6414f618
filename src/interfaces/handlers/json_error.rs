use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    HttpRequest,
};

use crate::errors::AppError;

/// Rewrites extractor failures into the uniform error body.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), "Rejected JSON body: {}", err);

    match err {
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            AppError::PayloadTooLarge(format!("JSON body exceeds {} bytes", limit)).into()
        }
        JsonPayloadError::ContentType => {
            AppError::UnsupportedMediaType("Expected application/json".into()).into()
        }
        JsonPayloadError::Deserialize(e) => AppError::BadRequest(format!("Invalid JSON: {}", e)).into(),
        other => AppError::BadRequest(format!("Invalid JSON payload: {}", other)).into(),
    }
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query parameters: {}", err)).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
}

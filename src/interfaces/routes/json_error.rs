use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::{
    errors::AppError,
    handlers::json_error::{json_error_handler, path_error_handler, query_error_handler},
};

const JSON_LIMIT: usize = 256 * 1024;
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Extractor limits and error shapes shared by every route.
pub fn config_extractors(max_upload_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(JSON_LIMIT)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(
            MultipartFormConfig::default()
                .total_limit(max_upload_bytes + MULTIPART_OVERHEAD)
                .memory_limit(MULTIPART_OVERHEAD)
                .error_handler(|err, _req| AppError::from(err).into()),
        );
    }
}

use actix_web::{web, Responder};
use tracing::instrument;

use crate::{
    entities::{
        api::ApiResponse,
        dev_log::{LogFilter, NewDevLogRequest},
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_logs(
    state: web::Data<AppState>,
    filter: web::Query<LogFilter>,
) -> Result<impl Responder, AppError> {
    let logs = state.log_handler.list_logs(filter.into_inner()).await?;

    Ok(ApiResponse::ok(logs))
}

#[instrument(skip(claims, state, data), fields(admin = %claims.0.sub))]
pub async fn create_log(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewDevLogRequest>,
) -> Result<impl Responder, AppError> {
    let log = state.log_handler.create_log(data.into_inner()).await?;

    Ok(ApiResponse::created(log))
}

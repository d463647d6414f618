use actix_web::{web, Responder};
use chrono::Utc;
use tracing::instrument;

use crate::{
    entities::{activity::ActivityQuery, api::ApiResponse},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_activity(
    state: web::Data<AppState>,
    query: web::Query<ActivityQuery>,
) -> Result<impl Responder, AppError> {
    let today = Utc::now().date_naive();
    let days = state.activity_handler.get_activity(query.days, today).await?;

    Ok(ApiResponse::ok(days))
}

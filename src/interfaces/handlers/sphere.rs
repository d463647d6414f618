use actix_web::{web, Responder};
use tracing::instrument;

use crate::{
    entities::{api::ApiResponse, sphere_config::SphereConfig},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_sphere_config(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let view = state.sphere_handler.get_view().await?;

    Ok(ApiResponse::ok(view))
}

#[instrument(skip(claims, state, data), fields(admin = %claims.0.sub))]
pub async fn save_sphere_config(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<SphereConfig>,
) -> Result<impl Responder, AppError> {
    let view = state.sphere_handler.save_config(data.into_inner()).await?;

    Ok(ApiResponse::ok(view))
}

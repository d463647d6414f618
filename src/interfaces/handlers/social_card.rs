use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::social_card::SocialCardRequest,
    errors::AppError,
    use_cases::{extractors::AdminClaims, social_card::render_social_card},
};

#[instrument(skip(claims, data), fields(admin = %claims.0.sub))]
pub async fn social_image(
    claims: AdminClaims,
    data: web::Json<SocialCardRequest>,
) -> Result<impl Responder, AppError> {
    let svg = render_social_card(data.into_inner())?;

    Ok(HttpResponse::Ok()
        .content_type("image/svg+xml")
        .body(svg))
}

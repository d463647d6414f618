use actix_multipart::form::MultipartForm;
use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        api::ApiResponse,
        media::{MediaFilter, MediaUpload, NewMediaRequest},
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_media(
    state: web::Data<AppState>,
    filter: web::Query<MediaFilter>,
) -> Result<impl Responder, AppError> {
    let media = state
        .media_handler
        .list_media(filter.into_inner().project_id)
        .await?;

    Ok(ApiResponse::ok(media))
}

/// `multipart/form-data` variant of `POST /api/admin/media`.
#[instrument(skip(claims, state, form), fields(admin = %claims.0.sub))]
pub async fn upload_media(
    claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<MediaUpload>,
) -> Result<impl Responder, AppError> {
    let media = state.media_handler.upload(form.into_inner()).await?;

    Ok(ApiResponse::created(media))
}

/// JSON variant of `POST /api/admin/media` for embeds and hosted files.
#[instrument(skip(claims, state, data), fields(admin = %claims.0.sub))]
pub async fn create_media(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewMediaRequest>,
) -> Result<impl Responder, AppError> {
    let media = state.media_handler.create_from_url(data.into_inner()).await?;

    Ok(ApiResponse::created(media))
}

#[instrument(skip(claims, state), fields(admin = %claims.0.sub))]
pub async fn delete_media(
    claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let response = state.media_handler.delete_media(id.into_inner()).await?;

    Ok(ApiResponse::ok(response))
}

/// Streams a stored object. Keys are content-addressed by a fresh UUID, so
/// objects never change once written.
#[instrument(skip(state))]
pub async fn serve_media_object(
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let object = state.media_handler.fetch_object(&key).await?;

    Ok(HttpResponse::Ok()
        .content_type(object.content_type)
        .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(object.bytes))
}

use actix_web::{web, HttpRequest, Responder};
use tracing::instrument;

use crate::{
    entities::{admin_user::LoginRequest, api::ApiResponse, token::VerifyRequest},
    errors::AuthError,
    middlewares::auth::bearer_token,
    utils::get_client_ip::get_client_ip,
    AppState,
};

#[instrument(skip(req, state, data), fields(username = %data.username))]
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<LoginRequest>,
) -> Result<impl Responder, AuthError> {
    let client = get_client_ip(&req, state.trust_forwarded_for);
    let response = state.auth_handler.login(data.into_inner(), &client).await?;

    Ok(ApiResponse::ok(response))
}

/// Accepts the token from the `Authorization` header or a `{ "token": ... }` body.
#[instrument(skip(req, state, body))]
pub async fn verify(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<VerifyRequest>>,
) -> Result<impl Responder, AuthError> {
    let token = bearer_token(req.headers())
        .or_else(|| body.and_then(|b| b.into_inner().token))
        .filter(|t| !t.trim().is_empty())
        .ok_or(AuthError::MissingCredentials)?;

    let response = state.auth_handler.verify(&token)?;

    Ok(ApiResponse::ok(response))
}

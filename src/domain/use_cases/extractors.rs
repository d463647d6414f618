use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::token::TokenClaims, errors::AuthError};

/// Claims of the authenticated admin, placed in the request extensions by
/// the auth middleware. Returns 401 when absent.
#[derive(Debug)]
pub struct AdminClaims(pub TokenClaims);

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<TokenClaims>() {
            Some(claims) => ready(Ok(AdminClaims(claims.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

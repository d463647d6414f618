use crate::{
    entities::{admin_user::AdminUser, token::TokenClaims},
    errors::AuthError,
};

#[cfg_attr(test, mockall::automock)]
pub trait TokenServiceRepository: Send + Sync {
    /// Issues a signed token for the admin, returning it with its claims
    fn create_token(&self, user: &AdminUser) -> Result<(String, TokenClaims), AuthError>;

    /// Checks the signature and expiry and returns the claims
    fn decode_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

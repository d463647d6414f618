use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload carried inside an admin token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub uid: i64,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub username: String,
}

impl AuthResponse {
    pub fn new(token: String, claims: &TokenClaims) -> Self {
        AuthResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_at: claims.expires_at(),
            username: claims.sub.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenClaims> for VerifyResponse {
    fn from(claims: TokenClaims) -> Self {
        VerifyResponse {
            valid: true,
            expires_at: claims.expires_at(),
            username: claims.sub,
        }
    }
}

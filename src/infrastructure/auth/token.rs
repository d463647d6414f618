use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::TOKEN_SIGNATURE_BYTES;
use crate::entities::admin_user::AdminUser;
use crate::entities::token::TokenClaims;
use crate::errors::AuthError;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::AppConfig;

type HmacSha256 = Hmac<Sha256>;

/// Issues and checks admin tokens of the form `base64url(claims).hex(tag)`,
/// where `tag` is the leading bytes of HMAC-SHA256 over the encoded claims.
#[derive(Clone)]
pub struct TokenService {
    key: Zeroizing<Vec<u8>>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_ttl(config, Duration::hours(config.token_ttl_hours))
    }

    pub fn with_ttl(config: &AppConfig, ttl: Duration) -> Self {
        TokenService {
            key: config.token_key(),
            ttl,
        }
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| AuthError::TokenCreation)
    }

    fn sign(&self, payload: &str) -> Result<String, AuthError> {
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let tag = mac.finalize().into_bytes();
        Ok(hex::encode(&tag[..TOKEN_SIGNATURE_BYTES]))
    }

    pub fn create_token(&self, user: &AdminUser) -> Result<(String, TokenClaims), AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.username.clone(),
            uid: user.id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let json = serde_json::to_vec(&claims).map_err(|_| AuthError::TokenCreation)?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = self.sign(&payload)?;

        Ok((format!("{}.{}", payload, signature), claims))
    }

    pub fn decode_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let (payload, signature) = token
            .trim()
            .split_once('.')
            .ok_or(AuthError::InvalidToken)?;

        let tag = hex::decode(signature).map_err(|_| AuthError::InvalidToken)?;
        if tag.len() != TOKEN_SIGNATURE_BYTES {
            return Err(AuthError::InvalidToken);
        }

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_truncated_left(&tag)
            .map_err(|_| AuthError::InvalidToken)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: TokenClaims =
            serde_json::from_slice(&json).map_err(|_| AuthError::InvalidToken)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

impl TokenServiceRepository for TokenService {
    fn create_token(&self, user: &AdminUser) -> Result<(String, TokenClaims), AuthError> {
        self.create_token(user)
    }

    fn decode_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.decode_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn admin() -> AdminUser {
        AdminUser {
            id: 7,
            username: "marco".into(),
            password_hash: String::new(),
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    fn service() -> TokenService {
        TokenService::new(&AppConfig::for_testing(PathBuf::from("media-test")))
    }

    #[test]
    fn issued_token_decodes() {
        let service = service();
        let (token, claims) = service.create_token(&admin()).unwrap();

        let (_, signature) = token.split_once('.').unwrap();
        assert_eq!(signature.len(), TOKEN_SIGNATURE_BYTES * 2);

        let decoded = service.decode_token(&token).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.sub, "marco");
        assert_eq!(decoded.uid, 7);
    }

    #[test]
    fn tampered_payload_rejected() {
        let service = service();
        let (token, _) = service.create_token(&admin()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        let forged_claims = TokenClaims {
            sub: "intruder".into(),
            uid: 1,
            iat: 0,
            exp: i64::MAX,
        };
        let forged = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap()),
            signature
        );

        assert!(matches!(service.decode_token(&forged), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tampered_signature_rejected() {
        let service = service();
        let (token, _) = service.create_token(&admin()).unwrap();
        let mut chars: Vec<char> = token.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '0' { '1' } else { '0' };
        let token: String = chars.into_iter().collect();

        assert!(matches!(service.decode_token(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn other_secret_rejected() {
        let (token, _) = service().create_token(&admin()).unwrap();

        let mut config = AppConfig::for_testing(PathBuf::from("media-test"));
        config.token_secret = "a_completely_different_secret_of_enough_length".into();
        let other = TokenService::new(&config);

        assert!(matches!(other.decode_token(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_rejected() {
        let config = AppConfig::for_testing(PathBuf::from("media-test"));
        let service = TokenService::with_ttl(&config, Duration::seconds(-5));
        let (token, _) = service.create_token(&admin()).unwrap();

        assert!(matches!(service.decode_token(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn malformed_tokens_rejected() {
        let service = service();
        for token in ["", "abc", "abc.", ".abc", "abc.zz", "a.b.c"] {
            assert!(service.decode_token(token).is_err(), "{token} should fail");
        }
    }
}

use once_cell::sync::Lazy;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::entities::admin_user::{AdminUser, LoginRequest, NewAdminUser};
use crate::entities::token::{AuthResponse, TokenClaims, VerifyResponse};
use crate::errors::{AppError, AuthError};
use crate::limiter::login_limiter::LoginLimiter;
use crate::repositories::admin_user::AdminUserRepository;
use crate::repositories::token::TokenServiceRepository;

/// Hash checked when the username is unknown, so both paths pay for one
/// argon2 verification.
static ABSENT_USER_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("marcomotion-absent-admin").ok());

fn credential_hash(user: Option<&AdminUser>) -> Option<&str> {
    match user {
        Some(user) => Some(user.password_hash.as_str()),
        None => ABSENT_USER_HASH.as_deref(),
    }
}

pub struct AuthHandler<R, T>
where
    R: AdminUserRepository,
    T: TokenServiceRepository,
{
    pub admin_repo: R,
    pub token_service: T,
    pub limiter: LoginLimiter,
}

impl<R, T> AuthHandler<R, T>
where
    R: AdminUserRepository,
    T: TokenServiceRepository,
{
    pub fn new(admin_repo: R, token_service: T, limiter: LoginLimiter) -> Self {
        AuthHandler {
            admin_repo,
            token_service,
            limiter,
        }
    }

    /// Checks credentials and issues a token. Every attempt from `client`
    /// counts against the limiter until one succeeds.
    pub async fn login(&self, request: LoginRequest, client: &str) -> Result<AuthResponse, AuthError> {
        self.limiter.check(client).map_err(|retry_after| {
            tracing::warn!(client = %client, retry_after, "Login attempts exhausted");
            AuthError::TooManyAttempts(retry_after)
        })?;

        request.validate()?;

        let username = request.username.trim();
        let user = self.admin_repo.find_by_username(username).await?;

        let is_password_valid = match credential_hash(user.as_ref()) {
            Some(hash) => verify_password(&request.password, hash).map_err(|e| {
                tracing::warn!(username = %username, "Password verification failed: {}", e);
                AuthError::WrongCredentials
            })?,
            None => false,
        };
        let user = match user {
            Some(user) if is_password_valid => user,
            _ => return Err(AuthError::WrongCredentials),
        };

        self.limiter.reset(client);
        if let Err(e) = self.admin_repo.record_login(user.id).await {
            tracing::warn!(username = %user.username, "Failed to record login time: {}", e);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(username = %user.username, "Admin logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &AdminUser) -> Result<AuthResponse, AuthError> {
        let (token, claims) = self.token_service.create_token(user).map_err(|e| {
            tracing::warn!("Failed to create token: {}", e);
            AuthError::TokenCreation
        })?;

        Ok(AuthResponse::new(token, &claims))
    }

    pub fn verify(&self, token: &str) -> Result<VerifyResponse, AuthError> {
        self.decode(token).map(VerifyResponse::from)
    }

    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.token_service.decode_token(token)
    }

    /// Creates the configured admin on first start. Returns false when the
    /// account already exists.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if self.admin_repo.find_by_username(username.trim()).await?.is_some() {
            return Ok(false);
        }

        let new_admin = NewAdminUser {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        new_admin.validate()?;

        let password_hash = hash_password(&new_admin.password)?;
        let admin = self
            .admin_repo
            .create_admin(&new_admin.prepare_for_insert(password_hash))
            .await?;

        tracing::info!(username = %admin.username, "Bootstrap admin account created");
        Ok(true)
    }
}

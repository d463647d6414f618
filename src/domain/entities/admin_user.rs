use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::password::validate_password_strength;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Username cannot be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Credentials for the bootstrap admin account created at startup.
#[derive(Debug, Validate)]
pub struct NewAdminUser {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

#[derive(Debug)]
pub struct AdminUserInsert {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewAdminUser {
    pub fn prepare_for_insert(&self, password_hash: String) -> AdminUserInsert {
        AdminUserInsert {
            username: self.username.trim().to_string(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

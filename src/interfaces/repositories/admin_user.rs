use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::admin_user::{AdminUser, AdminUserInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxAdminUserRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError>;

    async fn create_admin(&self, insert: &AdminUserInsert) -> Result<AdminUser, AppError>;

    async fn record_login(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxAdminUserRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxAdminUserRepo { pool }
    }
}

#[async_trait]
impl AdminUserRepository for SqlxAdminUserRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password_hash, last_login_at, created_at
            FROM admin_users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_admin(&self, insert: &AdminUserInsert) -> Result<AdminUser, AppError> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, last_login_at, created_at
            "#,
        )
        .bind(&insert.username)
        .bind(&insert.password_hash)
        .bind(insert.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Admin user already exists".into())
            }
            other => other.into(),
        })?;

        Ok(user)
    }

    async fn record_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE admin_users SET last_login_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

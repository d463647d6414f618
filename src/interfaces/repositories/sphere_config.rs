use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;

use crate::{
    entities::sphere_config::{SphereConfig, StoredSphereConfig},
    errors::AppError,
    repositories::sqlx_repo::SqlxSphereConfigRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SphereConfigRepository: Send + Sync {
    /// None until an admin saves a configuration
    async fn get_config(&self) -> Result<Option<StoredSphereConfig>, AppError>;

    async fn save_config(&self, config: &SphereConfig) -> Result<StoredSphereConfig, AppError>;
}

impl SqlxSphereConfigRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxSphereConfigRepo { pool }
    }
}

#[async_trait]
impl SphereConfigRepository for SqlxSphereConfigRepo {
    async fn get_config(&self) -> Result<Option<StoredSphereConfig>, AppError> {
        let stored = sqlx::query_as::<_, StoredSphereConfig>(
            "SELECT config, updated_at FROM sphere_config WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn save_config(&self, config: &SphereConfig) -> Result<StoredSphereConfig, AppError> {
        let stored = sqlx::query_as::<_, StoredSphereConfig>(
            r#"
            INSERT INTO sphere_config (id, config, updated_at)
            VALUES (1, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                config = excluded.config,
                updated_at = excluded.updated_at
            RETURNING config, updated_at
            "#,
        )
        .bind(Json(config))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}

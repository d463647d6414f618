use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    entities::media::{MediaInsert, ProjectMedia},
    errors::AppError,
    repositories::sqlx_repo::SqlxMediaRepo,
};

const MEDIA_COLUMNS: &str =
    "id, project_id, url, media_type, caption_en, caption_es, display_order, storage_key, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Lists media by display order, optionally for one project
    async fn list_media(&self, project_id: Option<String>) -> Result<Vec<ProjectMedia>, AppError>;

    async fn get_media(&self, id: i64) -> Result<Option<ProjectMedia>, AppError>;

    async fn create_media(&self, insert: &MediaInsert) -> Result<ProjectMedia, AppError>;

    async fn delete_media(&self, id: i64) -> Result<bool, AppError>;

    /// Whether any row still points at the stored object `key`
    async fn storage_key_in_use(&self, key: &str) -> Result<bool, AppError>;
}

impl SqlxMediaRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxMediaRepo { pool }
    }
}

#[async_trait]
impl MediaRepository for SqlxMediaRepo {
    async fn list_media(&self, project_id: Option<String>) -> Result<Vec<ProjectMedia>, AppError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM project_media", MEDIA_COLUMNS));

        if let Some(project_id) = project_id {
            query.push(" WHERE project_id = ").push_bind(project_id);
        }
        query.push(" ORDER BY display_order ASC, id ASC");

        let media = query
            .build_query_as::<ProjectMedia>()
            .fetch_all(&self.pool)
            .await?;

        Ok(media)
    }

    async fn get_media(&self, id: i64) -> Result<Option<ProjectMedia>, AppError> {
        let media = sqlx::query_as::<_, ProjectMedia>(&format!(
            "SELECT {} FROM project_media WHERE id = ?",
            MEDIA_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(media)
    }

    async fn create_media(&self, insert: &MediaInsert) -> Result<ProjectMedia, AppError> {
        let media = sqlx::query_as::<_, ProjectMedia>(&format!(
            r#"
            INSERT INTO project_media (
                project_id, url, media_type, caption_en, caption_es,
                display_order, storage_key, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            MEDIA_COLUMNS
        ))
        .bind(&insert.project_id)
        .bind(&insert.url)
        .bind(insert.media_type)
        .bind(&insert.caption_en)
        .bind(&insert.caption_es)
        .bind(insert.display_order)
        .bind(&insert.storage_key)
        .bind(insert.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(media)
    }

    async fn delete_media(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM project_media WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn storage_key_in_use(&self, key: &str) -> Result<bool, AppError> {
        let in_use: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM project_media WHERE storage_key = ?)")
                .bind(key)
                .fetch_one(&self.pool)
                .await?;

        Ok(in_use)
    }
}

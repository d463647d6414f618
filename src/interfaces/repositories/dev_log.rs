use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    constants::DEFAULT_LOG_LIMIT,
    entities::dev_log::{DevLog, DevLogEntry, DevLogInsert, LogFilter},
    errors::AppError,
    repositories::sqlx_repo::SqlxDevLogRepo,
};

const ENTRY_SELECT: &str = r#"
    SELECT l.id, l.project_id, p.code AS project_code, p.alias AS project_alias,
           p.accent_color, l.entry_type, l.one_liner, l.challenge, l.mental_note, l.created_at
    FROM dev_logs l
    JOIN projects p ON p.id = l.project_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DevLogRepository: Send + Sync {
    /// Lists logs newest first; `filter.limit` must already be clamped
    async fn list_logs(&self, filter: &LogFilter) -> Result<Vec<DevLogEntry>, AppError>;

    async fn create_log(&self, insert: &DevLogInsert) -> Result<DevLog, AppError>;

    async fn count_logs(&self) -> Result<i64, AppError>;
}

impl SqlxDevLogRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxDevLogRepo { pool }
    }
}

#[async_trait]
impl DevLogRepository for SqlxDevLogRepo {
    async fn list_logs(&self, filter: &LogFilter) -> Result<Vec<DevLogEntry>, AppError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(ENTRY_SELECT);
        query.push(" WHERE 1 = 1");

        if let Some(project_id) = &filter.project_id {
            query.push(" AND l.project_id = ").push_bind(project_id.clone());
        }
        if let Some(entry_type) = filter.entry_type {
            query.push(" AND l.entry_type = ").push_bind(entry_type);
        }
        query
            .push(" ORDER BY l.created_at DESC, l.id DESC LIMIT ")
            .push_bind(filter.limit.unwrap_or(DEFAULT_LOG_LIMIT) as i64);

        let entries = query
            .build_query_as::<DevLogEntry>()
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn create_log(&self, insert: &DevLogInsert) -> Result<DevLog, AppError> {
        let log = sqlx::query_as::<_, DevLog>(
            r#"
            INSERT INTO dev_logs (project_id, entry_type, one_liner, challenge, mental_note, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, project_id, entry_type, one_liner, challenge, mental_note, created_at
            "#,
        )
        .bind(&insert.project_id)
        .bind(insert.entry_type)
        .bind(&insert.one_liner)
        .bind(&insert.challenge)
        .bind(&insert.mental_note)
        .bind(insert.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    async fn count_logs(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dev_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    entities::activity::ActivityMetric,
    errors::AppError,
    repositories::sqlx_repo::SqlxActivityRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Stored daily counts with `from <= date <= to`, oldest first
    async fn metrics_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ActivityMetric>, AppError>;
}

impl SqlxActivityRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxActivityRepo { pool }
    }
}

#[async_trait]
impl ActivityRepository for SqlxActivityRepo {
    async fn metrics_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ActivityMetric>, AppError> {
        let metrics = sqlx::query_as::<_, ActivityMetric>(
            r#"
            SELECT date, entry_count
            FROM activity_metrics
            WHERE date >= ? AND date <= ?
            ORDER BY date ASC
            "#,
        )
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(metrics)
    }
}

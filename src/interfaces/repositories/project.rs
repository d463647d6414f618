use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, QueryBuilder, Sqlite};

use crate::{
    entities::project::{Project, ProjectDraft, ProjectFilter, ProjectInsert, ProjectRow},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str = "id, code, alias, name_en, name_es, description_en, description_es, \
    accent_color, category, status, progress, tech_stack, tags, external_url, display_order, \
    featured, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists projects by display order, then creation time
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError>;

    async fn get_project(&self, id: &str) -> Result<Option<Project>, AppError>;

    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError>;

    /// Replaces every mutable field of an existing project
    async fn update_project(&self, id: &str, draft: &ProjectDraft) -> Result<Project, AppError>;

    /// Deletes the project and, through the schema, its logs and media rows
    async fn delete_project(&self, id: &str) -> Result<bool, AppError>;

    async fn project_exists(&self, id: &str) -> Result<bool, AppError>;

    /// Cheap round trip used by the health check
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxProjectRepo { pool }
    }
}

fn map_code_conflict(code: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |err| match err {
        sqlx::Error::Database(e) if e.is_unique_violation() => {
            AppError::Conflict(format!("Project code '{}' already exists", code))
        }
        other => other.into(),
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM projects WHERE 1 = 1", PROJECT_COLUMNS));

        if let Some(featured) = filter.featured {
            query.push(" AND featured = ").push_bind(featured);
        }
        if let Some(category) = filter.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            query.push(" AND category = ").push_bind(category.to_string());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        query.push(" ORDER BY display_order ASC, created_at ASC");

        let rows = query
            .build_query_as::<ProjectRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM projects WHERE id = ?",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError> {
        let draft = &insert.draft;

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (
                id, code, alias, name_en, name_es, description_en, description_es,
                accent_color, category, status, progress, tech_stack, tags,
                external_url, display_order, featured, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        ))
        .bind(&insert.id)
        .bind(&draft.code)
        .bind(&draft.alias)
        .bind(&draft.name_en)
        .bind(&draft.name_es)
        .bind(&draft.description_en)
        .bind(&draft.description_es)
        .bind(&draft.accent_color)
        .bind(&draft.category)
        .bind(draft.status)
        .bind(draft.progress)
        .bind(Json(&draft.tech_stack))
        .bind(Json(&draft.tags))
        .bind(&draft.external_url)
        .bind(draft.display_order)
        .bind(draft.featured)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_code_conflict(&draft.code))?;

        Ok(row.into())
    }

    async fn update_project(&self, id: &str, draft: &ProjectDraft) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects SET
                code = ?, alias = ?, name_en = ?, name_es = ?,
                description_en = ?, description_es = ?, accent_color = ?,
                category = ?, status = ?, progress = ?, tech_stack = ?, tags = ?,
                external_url = ?, display_order = ?, featured = ?, updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        ))
        .bind(&draft.code)
        .bind(&draft.alias)
        .bind(&draft.name_en)
        .bind(&draft.name_es)
        .bind(&draft.description_en)
        .bind(&draft.description_es)
        .bind(&draft.accent_color)
        .bind(&draft.category)
        .bind(draft.status)
        .bind(draft.progress)
        .bind(Json(&draft.tech_stack))
        .bind(Json(&draft.tags))
        .bind(&draft.external_url)
        .bind(draft.display_order)
        .bind(draft.featured)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_code_conflict(&draft.code))?;

        row.map(Project::from)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_project(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn project_exists(&self, id: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

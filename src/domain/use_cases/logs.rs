use validator::Validate;

use crate::{
    constants::{DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT},
    entities::dev_log::{DevLog, DevLogEntry, LogFilter, NewDevLogRequest},
    errors::AppError,
    repositories::{dev_log::DevLogRepository, project::ProjectRepository},
};

pub struct DevLogHandler<L, P>
where
    L: DevLogRepository,
    P: ProjectRepository,
{
    pub log_repo: L,
    pub project_repo: P,
}

impl<L, P> DevLogHandler<L, P>
where
    L: DevLogRepository,
    P: ProjectRepository,
{
    pub fn new(log_repo: L, project_repo: P) -> Self {
        DevLogHandler { log_repo, project_repo }
    }

    /// Newest first. The limit defaults to 20 and is capped at 100.
    pub async fn list_logs(&self, mut filter: LogFilter) -> Result<Vec<DevLogEntry>, AppError> {
        filter.limit = Some(clamp_limit(filter.limit));
        filter.project_id = filter
            .project_id
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        self.log_repo.list_logs(&filter).await
    }

    pub async fn create_log(&self, request: NewDevLogRequest) -> Result<DevLog, AppError> {
        request.validate()?;
        let insert = request.prepare_for_insert();
        insert.validate()?;

        if !self.project_repo.project_exists(&insert.project_id).await? {
            return Err(AppError::NotFound("Project not found".into()));
        }

        let log = self.log_repo.create_log(&insert).await?;
        tracing::info!(log_id = log.id, project_id = %log.project_id, "Dev log created");

        Ok(log)
    }
}

fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::dev_log::EntryType,
        repositories::{dev_log::MockDevLogRepository, project::MockProjectRepository},
    };

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(5000)), 100);
    }

    #[actix_rt::test]
    async fn listing_passes_clamped_limit() {
        let mut logs = MockDevLogRepository::new();
        logs.expect_list_logs()
            .withf(|f| f.limit == Some(100) && f.entry_type == Some(EntryType::Ship))
            .returning(|_| Ok(vec![]));

        let handler = DevLogHandler::new(logs, MockProjectRepository::new());
        let filter = LogFilter {
            project_id: None,
            entry_type: Some(EntryType::Ship),
            limit: Some(900),
        };

        assert!(handler.list_logs(filter).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn log_for_unknown_project_is_not_found() {
        let mut projects = MockProjectRepository::new();
        projects.expect_project_exists().returning(|_| Ok(false));
        let mut logs = MockDevLogRepository::new();
        logs.expect_create_log().never();

        let request = NewDevLogRequest {
            project_id: "ghost".into(),
            entry_type: Some(EntryType::Build),
            one_liner: "Wired the sphere".into(),
            ..Default::default()
        };

        let err = DevLogHandler::new(logs, projects).create_log(request).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

use validator::Validate;

use crate::{
    constants::PROJECT_DETAIL_LOGS,
    entities::{
        dev_log::LogFilter,
        project::{
            NewProjectRequest, Project, ProjectDeletedResponse, ProjectDetail, ProjectFilter,
            UpdateProjectRequest,
        },
    },
    errors::AppError,
    repositories::{dev_log::DevLogRepository, media::MediaRepository, project::ProjectRepository},
};

pub struct ProjectHandler<P, L, M>
where
    P: ProjectRepository,
    L: DevLogRepository,
    M: MediaRepository,
{
    pub project_repo: P,
    pub log_repo: L,
    pub media_repo: M,
}

impl<P, L, M> ProjectHandler<P, L, M>
where
    P: ProjectRepository,
    L: DevLogRepository,
    M: MediaRepository,
{
    pub fn new(project_repo: P, log_repo: L, media_repo: M) -> Self {
        ProjectHandler {
            project_repo,
            log_repo,
            media_repo,
        }
    }

    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects(filter).await
    }

    /// Project with its media and most recent logs
    pub async fn get_project_detail(&self, id: &str) -> Result<ProjectDetail, AppError> {
        let project = self.find_project(id).await?;

        let media = self.media_repo.list_media(Some(project.id.clone())).await?;
        let recent_logs = self
            .log_repo
            .list_logs(&LogFilter {
                project_id: Some(project.id.clone()),
                entry_type: None,
                limit: Some(PROJECT_DETAIL_LOGS),
            })
            .await?;

        Ok(ProjectDetail {
            project,
            media,
            recent_logs,
        })
    }

    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let draft = request.into_draft();
        draft.validate()?;

        let project = self.project_repo.create_project(&draft.prepare_for_insert()).await?;
        tracing::info!(project_id = %project.id, code = %project.code, "Project created");

        Ok(project)
    }

    /// Applies a partial update; absent fields keep their stored value
    pub async fn update_project(
        &self,
        id: &str,
        request: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let current = self.find_project(id).await?;

        let draft = request.apply(current)?;
        draft.validate()?;

        self.project_repo.update_project(id, &draft).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<ProjectDeletedResponse, AppError> {
        if !self.project_repo.delete_project(id).await? {
            return Err(AppError::NotFound("Project not found".into()));
        }
        tracing::info!(project_id = %id, "Project deleted with its logs and media");

        Ok(ProjectDeletedResponse {
            id: id.to_string(),
            deleted: true,
        })
    }

    async fn find_project(&self, id: &str) -> Result<Project, AppError> {
        self.project_repo
            .get_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }
}

use validator::Validate;

use crate::{
    domain::sphere::fibonacci_sphere,
    entities::{
        project::ProjectFilter,
        sphere_config::{SphereConfig, SphereNode, SphereView},
    },
    errors::AppError,
    repositories::{project::ProjectRepository, sphere_config::SphereConfigRepository},
};

pub struct SphereHandler<S, P>
where
    S: SphereConfigRepository,
    P: ProjectRepository,
{
    pub config_repo: S,
    pub project_repo: P,
}

impl<S, P> SphereHandler<S, P>
where
    S: SphereConfigRepository,
    P: ProjectRepository,
{
    pub fn new(config_repo: S, project_repo: P) -> Self {
        SphereHandler { config_repo, project_repo }
    }

    /// Current settings (defaults until saved) and the projects laid out on
    /// the lattice in display order.
    pub async fn get_view(&self) -> Result<SphereView, AppError> {
        let (config, updated_at) = match self.config_repo.get_config().await? {
            Some(stored) => (stored.config.0, Some(stored.updated_at)),
            None => (SphereConfig::default(), None),
        };

        let nodes = self.layout(&config).await?;
        Ok(SphereView { config, nodes, updated_at })
    }

    pub async fn save_config(&self, config: SphereConfig) -> Result<SphereView, AppError> {
        config.validate()?;

        let stored = self.config_repo.save_config(&config).await?;
        tracing::info!("Sphere configuration updated");

        let config = stored.config.0;
        let nodes = self.layout(&config).await?;
        Ok(SphereView {
            config,
            nodes,
            updated_at: Some(stored.updated_at),
        })
    }

    async fn layout(&self, config: &SphereConfig) -> Result<Vec<SphereNode>, AppError> {
        let filter = ProjectFilter {
            featured: config.featured_only.then_some(true),
            ..Default::default()
        };
        let projects = self.project_repo.list_projects(&filter).await?;
        let points = fibonacci_sphere(projects.len(), config.radius);

        Ok(projects
            .into_iter()
            .zip(points)
            .map(|(project, position)| SphereNode {
                project_id: project.id,
                code: project.code,
                alias: project.alias,
                accent_color: project.accent_color,
                status: project.status,
                progress: project.progress,
                position,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::project::Project,
        repositories::{project::MockProjectRepository, sphere_config::MockSphereConfigRepository},
    };
    use chrono::Utc;

    fn project(code: &str) -> Project {
        let now = Utc::now();
        Project {
            id: code.to_lowercase(),
            code: code.into(),
            alias: code.to_lowercase(),
            name_en: code.into(),
            name_es: None,
            description_en: "x".into(),
            description_es: None,
            accent_color: "#00E5FF".into(),
            category: "web".into(),
            status: Default::default(),
            progress: 0,
            tech_stack: vec![],
            tags: vec![],
            external_url: None,
            display_order: 0,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_rt::test]
    async fn defaults_used_until_saved() {
        let mut configs = MockSphereConfigRepository::new();
        configs.expect_get_config().returning(|| Ok(None));
        let mut projects = MockProjectRepository::new();
        projects.expect_list_projects()
            .withf(|f| f.featured.is_none())
            .returning(|_| Ok(vec![project("MM-01"), project("MM-02"), project("MM-03")]));

        let view = SphereHandler::new(configs, projects).get_view().await.unwrap();

        assert_eq!(view.config, SphereConfig::default());
        assert!(view.updated_at.is_none());
        assert_eq!(view.nodes.len(), 3);
        for node in &view.nodes {
            let [x, y, z] = node.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - view.config.radius).abs() < 1e-9);
        }
    }

    #[actix_rt::test]
    async fn invalid_config_not_saved() {
        let mut configs = MockSphereConfigRepository::new();
        configs.expect_save_config().never();

        let config = SphereConfig {
            radius: 0.0,
            ..Default::default()
        };
        let err = SphereHandler::new(configs, MockProjectRepository::new())
            .save_config(config)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }
}

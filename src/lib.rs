use std::{sync::Arc, time::Duration};

use sqlx::SqlitePool;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, limiter, storage, utils};

use auth::token::TokenService;
use limiter::login_limiter::LoginLimiter;
use repositories::{
    sqlx_repo::{
        SqlxActivityRepo, SqlxAdminUserRepo, SqlxDevLogRepo, SqlxMediaRepo, SqlxProjectRepo,
        SqlxSphereConfigRepo,
    },
    storage::MediaStorage,
};
use use_cases::{
    activity::ActivityHandler, auth::AuthHandler, logs::DevLogHandler, media::MediaHandler,
    projects::ProjectHandler, sphere::SphereHandler,
};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub log_handler: AppDevLogHandler,
    pub activity_handler: AppActivityHandler,
    pub media_handler: AppMediaHandler,
    pub sphere_handler: AppSphereHandler,
    pub auth_handler: AppAuthHandler,
    pub trust_forwarded_for: bool,
}

pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo, SqlxDevLogRepo, SqlxMediaRepo>;
pub type AppDevLogHandler = DevLogHandler<SqlxDevLogRepo, SqlxProjectRepo>;
pub type AppActivityHandler = ActivityHandler<SqlxActivityRepo>;
pub type AppMediaHandler = MediaHandler<SqlxMediaRepo, SqlxProjectRepo>;
pub type AppSphereHandler = SphereHandler<SqlxSphereConfigRepo, SqlxProjectRepo>;
pub type AppAuthHandler = AuthHandler<SqlxAdminUserRepo, TokenService>;

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        pool: SqlitePool,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        let project_repo = SqlxProjectRepo::new(pool.clone());
        let log_repo = SqlxDevLogRepo::new(pool.clone());
        let media_repo = SqlxMediaRepo::new(pool.clone());

        let limiter = LoginLimiter::new(
            config.login_max_attempts,
            Duration::from_secs(config.login_window_secs),
        );

        AppState {
            project_handler: ProjectHandler::new(
                project_repo.clone(),
                log_repo.clone(),
                media_repo.clone(),
            ),
            log_handler: DevLogHandler::new(log_repo, project_repo.clone()),
            activity_handler: ActivityHandler::new(SqlxActivityRepo::new(pool.clone())),
            media_handler: MediaHandler::new(
                media_repo,
                project_repo.clone(),
                storage,
                config.max_upload_bytes,
            ),
            sphere_handler: SphereHandler::new(SqlxSphereConfigRepo::new(pool.clone()), project_repo),
            auth_handler: AuthHandler::new(
                SqlxAdminUserRepo::new(pool),
                TokenService::new(config),
                limiter,
            ),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }
}

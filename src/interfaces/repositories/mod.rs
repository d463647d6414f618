pub mod activity;
pub mod admin_user;
pub mod dev_log;
pub mod media;
pub mod project;
pub mod sphere_config;
pub mod sqlx_repo;
pub mod storage;
pub mod token;

pub mod activity;
pub mod auth;
pub mod home;
pub mod json_error;
pub mod logs;
pub mod media;
pub mod projects;
pub mod social_card;
pub mod sphere;
pub mod system;

pub mod activity;
pub mod auth;
pub mod extractors;
pub mod logs;
pub mod media;
pub mod projects;
pub mod social_card;
pub mod sphere;

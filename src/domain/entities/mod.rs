pub mod activity;
pub mod admin_user;
pub mod api;
pub mod dev_log;
pub mod media;
pub mod option_fields;
pub mod project;
pub mod social_card;
pub mod sphere_config;
pub mod token;
pub mod validation;

use actix_web::web;

use crate::handlers::home::{home, not_found};

mod admin;
mod json_error;
mod public;

pub use json_error::config_extractors;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    // The admin scope must come first: the public `/api` scope would
    // otherwise claim every `/api/admin` path.
    cfg.service(web::scope("/api/admin").configure(admin::config_routes));
    cfg.configure(public::config_routes);

    cfg.default_service(web::to(not_found));
}

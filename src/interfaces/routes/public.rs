use actix_web::web;

use crate::handlers::{activity, logs, media, projects, sphere};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/projects")
                    .route(web::get().to(projects::list_projects))
            )
            .service(
                web::resource("/projects/{id}")
                    .route(web::get().to(projects::get_project))
            )
            .service(web::resource("/logs").route(web::get().to(logs::list_logs)))
            .service(web::resource("/activity").route(web::get().to(activity::get_activity)))
            .service(web::resource("/media").route(web::get().to(media::list_media)))
            .service(
                web::resource("/sphere-config")
                    .route(web::get().to(sphere::get_sphere_config))
            )
    );

    cfg.service(
        web::resource("/media/{key}").route(web::get().to(media::serve_media_object))
    );
}

use actix_web::{guard, http::header, web};

use crate::handlers::{auth, logs, media, projects, social_card, sphere, system};

fn is_multipart(ctx: &guard::GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

/// Mounted under `/api/admin`; the auth middleware guards everything but
/// login and verify.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/verify", web::post().to(auth::verify))
    )
    .service(
        web::resource("/projects")
            .route(web::post().to(projects::create_project))
    )
    .service(
        web::resource("/projects/{id}")
            .route(web::put().to(projects::update_project))
            .route(web::delete().to(projects::delete_project))
    )
    .service(web::resource("/logs").route(web::post().to(logs::create_log)))
    .service(
        web::resource("/media")
            .route(web::post().guard(guard::fn_guard(is_multipart)).to(media::upload_media))
            .route(web::post().to(media::create_media))
    )
    .service(
        web::resource("/media/{id}")
            .route(web::delete().to(media::delete_media))
    )
    .service(
        web::resource("/sphere-config")
            .route(web::post().to(sphere::save_sphere_config))
    )
    .service(
        web::resource("/social-image")
            .route(web::post().to(social_card::social_image))
    )
    .service(web::resource("/health").route(web::get().to(system::admin_health_check)));
}

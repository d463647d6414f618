use actix_web::{get, HttpResponse, Responder};

use crate::entities::api::ApiResponse;

#[get("/")]
pub async fn home() -> impl Responder {
    ApiResponse::ok(serde_json::json!({
        "name": "MarcoMotion API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "endpoints": {
            "projects": "/api/projects",
            "logs": "/api/logs",
            "activity": "/api/activity",
            "media": "/api/media",
            "sphere_config": "/api/sphere-config",
        }
    }))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "error": "Route not found"
    }))
}

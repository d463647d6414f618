use actix_web::HttpResponse;
use serde::Serialize;

/// Success envelope shared by every endpoint: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        ApiResponse { success: true, data }
    }

    pub fn ok(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::new(data))
    }

    pub fn created(data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::new(data))
    }
}

//! REST API routes for the festival catalog

pub mod artist;
pub mod festival;

use actix_web::{web, HttpResponse};

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Festival routes
        .service(web::scope("/api/festivals").configure(festival::configure))
        // Artist routes
        .service(web::scope("/api/artists").configure(artist::configure));
}

/// 404 response for an id that does not resolve
pub(crate) fn not_found(entity: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": format!("{} not found", entity)
    }))
}

//! Festival API routes, including photo and lineup management

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::info;

use super::not_found;
use crate::models::FestivalInput;
use crate::stores::FestivalStore;

#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    pub url: String,
}

/// Get all festivals
#[get("")]
pub async fn list_festivals(store: web::Data<FestivalStore>) -> impl Responder {
    HttpResponse::Ok().json(store.list_festivals())
}

/// Get festival by id
#[get("/{id}")]
pub async fn get_festival(store: web::Data<FestivalStore>, path: web::Path<i64>) -> impl Responder {
    match store.get_festival(path.into_inner()) {
        Some(festival) => HttpResponse::Ok().json(festival),
        None => not_found("Festival"),
    }
}

/// Create a festival; any id in the body is discarded
#[post("")]
pub async fn create_festival(
    store: web::Data<FestivalStore>,
    body: web::Json<FestivalInput>,
) -> impl Responder {
    let festival = store.create_festival(body.into_inner());
    info!("Created festival {} ({})", festival.id, festival.name);
    HttpResponse::Created().json(festival)
}

/// Replace a festival's fields; the lineup is managed through its own routes
#[put("/{id}")]
pub async fn update_festival(
    store: web::Data<FestivalStore>,
    path: web::Path<i64>,
    body: web::Json<FestivalInput>,
) -> impl Responder {
    match store.update_festival(path.into_inner(), body.into_inner()) {
        Some(festival) => HttpResponse::Ok().json(festival),
        None => not_found("Festival"),
    }
}

#[delete("/{id}")]
pub async fn delete_festival(
    store: web::Data<FestivalStore>,
    path: web::Path<i64>,
) -> impl Responder {
    store.delete_festival(path.into_inner());
    HttpResponse::NoContent().finish()
}

/// Append a photo; the raw request body is the URL
#[post("/{id}/photos")]
pub async fn add_photo(
    store: web::Data<FestivalStore>,
    path: web::Path<i64>,
    body: String,
) -> impl Responder {
    match store.add_photo(path.into_inner(), &body) {
        Some(festival) => HttpResponse::Ok().json(festival),
        None => not_found("Festival"),
    }
}

/// Remove every copy of a photo URL
#[delete("/{id}/photos")]
pub async fn remove_photo(
    store: web::Data<FestivalStore>,
    path: web::Path<i64>,
    query: web::Query<PhotoQuery>,
) -> impl Responder {
    match store.remove_photo(path.into_inner(), &query.url) {
        Some(festival) => HttpResponse::Ok().json(festival),
        None => not_found("Festival"),
    }
}

#[get("/{id}/lineup")]
pub async fn get_lineup(store: web::Data<FestivalStore>, path: web::Path<i64>) -> impl Responder {
    match store.lineup(path.into_inner()) {
        Some(artists) => HttpResponse::Ok().json(artists),
        None => not_found("Festival"),
    }
}

#[post("/{festival_id}/lineup/{artist_id}")]
pub async fn add_artist(
    store: web::Data<FestivalStore>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (festival_id, artist_id) = path.into_inner();
    match store.add_artist_to_festival(festival_id, artist_id) {
        Some(festival) => HttpResponse::Ok().json(festival),
        None => not_found("Festival or artist"),
    }
}

#[delete("/{festival_id}/lineup/{artist_id}")]
pub async fn remove_artist(
    store: web::Data<FestivalStore>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (festival_id, artist_id) = path.into_inner();
    match store.remove_artist_from_festival(festival_id, artist_id) {
        Some(festival) => HttpResponse::Ok().json(festival),
        None => not_found("Festival"),
    }
}

/// Configure festival routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_festivals)
        .service(create_festival)
        .service(get_festival)
        .service(update_festival)
        .service(delete_festival)
        .service(add_photo)
        .service(remove_photo)
        .service(get_lineup)
        .service(add_artist)
        .service(remove_artist);
}

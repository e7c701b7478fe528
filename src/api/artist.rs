//! Artist API routes

use actix_web::http::header;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use tracing::info;

use super::not_found;
use crate::models::ArtistInput;
use crate::stores::FestivalStore;

/// Get all artists
#[get("")]
pub async fn list_artists(store: web::Data<FestivalStore>) -> impl Responder {
    HttpResponse::Ok().json(store.list_artists())
}

/// Get artist by id
#[get("/{id}")]
pub async fn get_artist(store: web::Data<FestivalStore>, path: web::Path<i64>) -> impl Responder {
    match store.get_artist(path.into_inner()) {
        Some(artist) => HttpResponse::Ok().json(artist),
        None => not_found("Artist"),
    }
}

#[post("")]
pub async fn create_artist(
    store: web::Data<FestivalStore>,
    body: web::Json<ArtistInput>,
) -> impl Responder {
    let artist = store.create_artist(body.into_inner());
    info!("Created artist {} ({})", artist.id, artist.name);
    HttpResponse::Created().json(artist)
}

#[put("/{id}")]
pub async fn update_artist(
    store: web::Data<FestivalStore>,
    path: web::Path<i64>,
    body: web::Json<ArtistInput>,
) -> impl Responder {
    match store.update_artist(path.into_inner(), body.into_inner()) {
        Some(artist) => HttpResponse::Ok().json(artist),
        None => not_found("Artist"),
    }
}

/// Delete an artist; it also leaves every lineup it was part of
#[delete("/{id}")]
pub async fn delete_artist(store: web::Data<FestivalStore>, path: web::Path<i64>) -> impl Responder {
    store.delete_artist(path.into_inner());
    HttpResponse::NoContent().finish()
}

/// Redirect to the artist's photo, or 204 when none is set
#[get("/{id}/photo")]
pub async fn get_photo(store: web::Data<FestivalStore>, path: web::Path<i64>) -> impl Responder {
    let Some(artist) = store.get_artist(path.into_inner()) else {
        return not_found("Artist");
    };

    match artist.photo_redirect() {
        Some(url) => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, url))
            .finish(),
        None => HttpResponse::NoContent().finish(),
    }
}

/// Configure artist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_artists)
        .service(create_artist)
        .service(get_artist)
        .service(update_artist)
        .service(delete_artist)
        .service(get_photo);
}

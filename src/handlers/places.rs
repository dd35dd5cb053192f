// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place lookups
// PURPOSE: Parse requests, call services, return responses
//
// Every handler answers 200; failures travel in the body's `error` field.

use crate::errors::{ErrorBody, TravelError};
use crate::models::{
    AutocompleteRequest, AutocompleteResponse, DestinationPhotoRequest, SearchRequest,
    SearchResponse,
};
use crate::services::{GooglePlacesClient, PlaceService};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// POST /api/destination-photo
pub async fn destination_photo(
    google_client: web::Data<GooglePlacesClient>,
    req: web::Json<DestinationPhotoRequest>,
) -> impl Responder {
    if req.validate().is_err() {
        let err = TravelError::ValidationError("Destination is required".to_string());
        return HttpResponse::Ok().json(ErrorBody::from(err));
    }

    let destination = req.destination.trim();
    match PlaceService::destination_photo(google_client.get_ref(), destination).await {
        Ok(photo) => HttpResponse::Ok().json(photo),
        Err(e) => HttpResponse::Ok().json(ErrorBody::from(e)),
    }
}

/// POST /api/search
/// Categorized place search; failed categories are simply missing
pub async fn search_places(
    google_client: web::Data<GooglePlacesClient>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    let results = PlaceService::search_by_interests(
        google_client.get_ref(),
        req.destination(),
        &req.search_terms(),
    )
    .await;

    HttpResponse::Ok().json(SearchResponse { results })
}

/// POST /api/autocomplete
pub async fn autocomplete(
    google_client: web::Data<GooglePlacesClient>,
    req: web::Json<AutocompleteRequest>,
) -> impl Responder {
    let Some(query) = req.searchable_query() else {
        return HttpResponse::Ok().json(AutocompleteResponse::empty());
    };

    match PlaceService::autocomplete(google_client.get_ref(), query).await {
        Ok(predictions) => HttpResponse::Ok().json(AutocompleteResponse {
            predictions,
            error: None,
        }),
        Err(e) => HttpResponse::Ok().json(AutocompleteResponse::failed(e.to_string())),
    }
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/destination-photo", web::post().to(destination_photo))
        .route("/api/search", web::post().to(search_places))
        .route("/api/autocomplete", web::post().to(autocomplete));
}

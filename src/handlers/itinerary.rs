// src/handlers/itinerary.rs
// DOCUMENTATION: HTTP handler for itinerary generation
// PURPOSE: Hand the request to the itinerary service and return its outcome as-is

use crate::models::ItineraryRequest;
use crate::services::{GeminiClient, ItineraryService};
use actix_web::{web, HttpResponse, Responder};

/// POST /api/itinerary
/// Always 200: `{itinerary}` or `{itinerary: null, error, raw?}`
pub async fn generate_itinerary(
    gemini: web::Data<GeminiClient>,
    req: web::Json<ItineraryRequest>,
) -> impl Responder {
    let response = ItineraryService::generate(gemini.get_ref(), &req).await;
    HttpResponse::Ok().json(response)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/itinerary", web::post().to(generate_itinerary));
}

// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod itinerary;
pub mod places;

use crate::errors::TravelError;
use actix_web::web;

pub use health::config as health_config;
pub use itinerary::config as itinerary_config;
pub use places::config as places_config;

/// JSON body extractor settings
/// DOCUMENTATION: Undecodable bodies are answered with the JSON error format
/// instead of actix's plain-text default
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| {
            log::warn!("Rejected request body: {}", err);
            TravelError::InvalidInput(err.to_string()).into()
        })
}

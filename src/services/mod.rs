// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod gemini_client;
pub mod google_places_client;
pub mod itinerary_service;
pub mod place_service;

pub use gemini_client::*;
pub use google_places_client::*;
pub use itinerary_service::*;
pub use place_service::*;

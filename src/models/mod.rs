// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod autocomplete;
pub mod itinerary;
pub mod place;

pub use autocomplete::*;
pub use itinerary::*;
pub use place::*;

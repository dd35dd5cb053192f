// src/config/cors.rs
// DOCUMENTATION: Cross-origin policy for the front-end
// PURPOSE: Build the CORS middleware from configured origins

use crate::config::Config;
use actix_cors::Cors;

/// Build CORS middleware
/// DOCUMENTATION: Allows the configured front-end origins with any method and
/// header, credentials included. Called inside the HttpServer factory, once
/// per worker.
pub fn build_cors(config: &Config) -> Cors {
    let cors = config
        .cors_allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and provider clients, then start the HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use dotenv::dotenv;
use services::{GeminiClient, GooglePlacesClient};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    log::info!("Starting travel planner relay...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );
    log::debug!("Configuration: {:?}", config);

    // 4. Provider clients, shared read-only by every worker
    let google_client = web::Data::new(
        GooglePlacesClient::from_config(&config).context("building Google Maps client")?,
    );
    let gemini_client =
        web::Data::new(GeminiClient::from_config(&config).context("building Gemini client")?);
    log::info!(
        "Provider clients ready (model: {}, timeout: {}s)",
        gemini_client.model(),
        config.request_timeout().as_secs()
    );

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (provider clients)
            .app_data(google_client.clone())
            .app_data(gemini_client.clone())
            .app_data(handlers::json_config())
            // Middleware
            .wrap(config::build_cors(&config_clone))
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
            .configure(handlers::itinerary_config)
    })
    .bind(&server_addr)
    .with_context(|| format!("binding {}", server_addr))?
    .run()
    .await?;

    Ok(())
}

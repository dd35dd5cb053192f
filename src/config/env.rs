// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::fmt;
use std::time::Duration;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup; never mutated afterwards
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Maps Platform key (Places, Geocoding, Autocomplete)
    pub google_api_key: String,

    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini model used for itinerary generation
    pub gemini_model: String,

    /// Ask Gemini for an application/json response
    pub gemini_json_mode: bool,

    /// Front-end origins allowed by CORS
    pub cors_allowed_origins: Vec<String>,

    /// Timeout applied to every outbound provider call, in seconds
    pub request_timeout_secs: u64,

    /// Base URL for the Google Maps web services
    pub google_maps_base_url: String,

    /// Base URL for the Gemini REST API
    pub gemini_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),

            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),

            gemini_json_mode: env::var("GEMINI_JSON_MODE")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            cors_allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string()),
            ),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            google_maps_base_url: env::var("GOOGLE_MAPS_BASE_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api".to_string()),

            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
        }
    }

    /// Outbound request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.cors_allowed_origins.is_empty() {
            return Err("CORS_ALLOWED_ORIGINS must list at least one origin".to_string());
        }

        if self.google_api_key.is_empty() {
            log::warn!("GOOGLE_API_KEY not configured - place lookups will fail");
        }

        if self.gemini_api_key.is_empty() {
            log::warn!("GEMINI_API_KEY not configured - itinerary generation will fail");
        }

        Ok(())
    }
}

// Keys stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_address", &self.server_address)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("google_api_key", &redact(&self.google_api_key))
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_json_mode", &self.gemini_json_mode)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("google_maps_base_url", &self.google_maps_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
impl Config {
    /// Configuration pointing both providers at a mock server
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 8000,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
            google_api_key: "test-google-key".to_string(),
            gemini_api_key: "test-gemini-key".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_json_mode: false,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 5,
            google_maps_base_url: base_url.to_string(),
            gemini_base_url: base_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins(" http://localhost:3000/ , ,https://trips.example.com");
        assert_eq!(
            origins,
            vec!["http://localhost:3000", "https://trips.example.com"]
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag(" off "));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config::for_tests("http://localhost:1");
        let printed = format!("{:?}", config);

        assert!(!printed.contains("test-google-key"));
        assert!(!printed.contains("test-gemini-key"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_validate_requires_origins() {
        let mut config = Config::for_tests("http://localhost:1");
        assert!(config.validate().is_ok());

        config.cors_allowed_origins.clear();
        assert!(config.validate().is_err());
    }
}

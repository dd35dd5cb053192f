// src/services/google_places_client.rs
// DOCUMENTATION: Google Maps Platform client
// PURPOSE: Text search, geocoding, photo URLs and city autocomplete

use crate::config::Config;
use crate::errors::TravelError;
use geo_types::Point;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Radius used to bias text searches around a geocoded destination (50 km)
pub const SEARCH_BIAS_RADIUS_M: u32 = 50_000;

/// Width bound for every photo URL handed to the front-end
pub const PHOTO_MAX_WIDTH: u32 = 400;

/// Google Maps Platform client
/// DOCUMENTATION: Built once at startup and shared by all handlers
pub struct GooglePlacesClient {
    /// HTTP client for making requests (carries the request timeout)
    client: Client,
    /// Google Maps Platform API key
    api_key: String,
    /// Base URL, e.g. https://maps.googleapis.com/maps/api
    base_url: String,
}

/// Response from Places Text Search
#[derive(Debug, Deserialize, Serialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub results: Vec<GooglePlace>,
    pub status: String,
    pub error_message: Option<String>,
}

/// Individual place from a text search
/// DOCUMENTATION: Everything optional; the relay decides what to skip
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlace {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    /// Rating (0-5)
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<i64>,
    /// Price level (0-4: free to very expensive)
    #[serde(default)]
    pub price_level: Option<i64>,
    #[serde(default)]
    pub opening_hours: Option<GoogleOpeningHours>,
    #[serde(default)]
    pub photos: Option<Vec<GooglePhoto>>,
}

impl GooglePlace {
    /// Reference of the first photo, if the place exposes one
    pub fn first_photo_reference(&self) -> Option<&str> {
        self.photos
            .as_ref()
            .and_then(|photos| photos.first())
            .and_then(|photo| photo.photo_reference.as_deref())
    }
}

/// Opening hours indicator
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

/// Photo descriptor from Google Places
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePhoto {
    /// Photo reference (used to fetch actual photo)
    #[serde(default)]
    pub photo_reference: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: GeocodeLocation,
}

#[derive(Debug, Deserialize)]
struct GeocodeLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AutocompleteApiResponse {
    #[serde(default)]
    predictions: Vec<Value>,
    status: String,
    error_message: Option<String>,
}

impl GooglePlacesClient {
    /// Create new Google Maps client
    /// DOCUMENTATION: Every request made through it is bounded by `timeout`
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, TravelError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TravelError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, TravelError> {
        Self::new(
            config.google_api_key.clone(),
            config.google_maps_base_url.clone(),
            config.request_timeout(),
        )
    }

    /// Places Text Search
    /// DOCUMENTATION: Free-text query, optionally biased to a circle around
    /// `bias` (radius in meters). Results keep provider order.
    pub async fn text_search(
        &self,
        query: &str,
        bias: Option<(Point<f64>, u32)>,
    ) -> Result<Vec<GooglePlace>, TravelError> {
        let url = format!("{}/place/textsearch/json", self.base_url);

        let mut params = vec![
            ("query", query.to_string()),
            ("key", self.api_key.clone()),
        ];

        if let Some((center, radius)) = bias {
            params.push(("location", format!("{},{}", center.y(), center.x())));
            params.push(("radius", radius.to_string()));
        }

        log::debug!("Google Places text search: query={:?}, biased={}", query, bias.is_some());

        let response = self.client.get(&url).query(&params).send().await.map_err(|e| {
            let e = e.without_url();
            log::error!("Google Places API request failed: {}", e);
            TravelError::from(e)
        })?;

        let api_response: TextSearchResponse = Self::parse_body(response, "text search").await?;
        Self::check_status(&api_response.status, api_response.error_message)?;

        log::info!(
            "Google Places search for {:?} returned {} results",
            query,
            api_response.results.len()
        );
        Ok(api_response.results)
    }

    /// Geocode an address to a point (x = longitude, y = latitude)
    /// DOCUMENTATION: Uses the first geocoding result; no result is an error
    pub async fn geocode(&self, address: &str) -> Result<Point<f64>, TravelError> {
        let url = format!("{}/geocode/json", self.base_url);
        let params = [("address", address), ("key", self.api_key.as_str())];

        log::debug!("Geocoding address: {:?}", address);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| TravelError::from(e.without_url()))?;

        let api_response: GeocodeResponse = Self::parse_body(response, "geocode").await?;
        Self::check_status(&api_response.status, api_response.error_message)?;

        api_response
            .results
            .first()
            .map(|r| Point::new(r.geometry.location.lng, r.geometry.location.lat))
            .ok_or_else(|| TravelError::NotFound(format!("No geocoding result for {}", address)))
    }

    /// Place Autocomplete restricted to cities
    /// DOCUMENTATION: Predictions are returned as the provider sent them
    pub async fn autocomplete_cities(&self, input: &str) -> Result<Vec<Value>, TravelError> {
        let url = format!("{}/place/autocomplete/json", self.base_url);
        let params = [
            ("input", input),
            ("types", "(cities)"),
            ("key", self.api_key.as_str()),
        ];

        log::debug!("Google Places autocomplete: input={:?}", input);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| TravelError::from(e.without_url()))?;

        let api_response: AutocompleteApiResponse = Self::parse_body(response, "autocomplete").await?;
        Self::check_status(&api_response.status, api_response.error_message)?;

        Ok(api_response.predictions)
    }

    /// Get photo URL from photo reference
    /// DOCUMENTATION: Converts a photo_reference into a URL usable in img tags
    pub fn get_photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!(
            "{}/place/photo?maxwidth={}&photoreference={}&key={}",
            self.base_url, max_width, photo_reference, self.api_key
        )
    }

    async fn parse_body<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T, TravelError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Google {} error {}: {}", operation, status, body);
            if status.as_u16() == 429 {
                return Err(TravelError::RateLimitExceeded);
            }
            return Err(TravelError::ExternalApiError(format!("API error {}", status)));
        }

        response.json().await.map_err(|e| {
            let e = e.without_url();
            log::error!("Failed to parse Google {} response: {}", operation, e);
            TravelError::ExternalApiError(format!("Parse error: {}", e))
        })
    }

    /// Map the `status` field every Maps web service returns
    fn check_status(status: &str, error_message: Option<String>) -> Result<(), TravelError> {
        match status {
            "OK" | "ZERO_RESULTS" => Ok(()),
            "OVER_QUERY_LIMIT" => {
                log::error!("Google Maps API quota exceeded");
                Err(TravelError::RateLimitExceeded)
            }
            "REQUEST_DENIED" | "INVALID_REQUEST" => {
                let msg = error_message.unwrap_or_else(|| status.to_string());
                log::error!("Google Maps API request denied: {}", msg);
                Err(TravelError::ExternalApiError(msg))
            }
            other => {
                let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
                log::error!("Google Maps API unexpected status: {}", msg);
                Err(TravelError::ExternalApiError(msg))
            }
        }
    }
}

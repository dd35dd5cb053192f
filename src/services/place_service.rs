// src/services/place_service.rs
// DOCUMENTATION: Business logic for place lookups
// PURPOSE: Destination photos, categorized interest search and autocomplete

use crate::errors::TravelError;
use crate::models::{
    CategorizedResults, DestinationPhotoResponse, PlaceResult, GENERAL_INTEREST,
};
use crate::services::google_places_client::{
    GooglePlace, GooglePlacesClient, PHOTO_MAX_WIDTH, SEARCH_BIAS_RADIUS_M,
};
use futures::future::join_all;
use geo_types::Point;
use serde_json::Value;
use std::collections::HashSet;

pub struct PlaceService;

impl PlaceService {
    /// Find a representative photo for a destination
    /// DOCUMENTATION: Searches "<destination> landmarks attractions" first and
    /// falls back once to the bare destination. The first result whose first
    /// photo carries a reference wins.
    pub async fn destination_photo(
        google_client: &GooglePlacesClient,
        destination: &str,
    ) -> Result<DestinationPhotoResponse, TravelError> {
        let landmark_query = format!("{} landmarks attractions", destination);
        let results = google_client
            .text_search(&landmark_query, None)
            .await
            .map_err(|e| {
                log::warn!("Destination photo search failed for {:?}: {}", destination, e);
                TravelError::Upstream("Failed to search for destination".to_string())
            })?;

        if let Some(photo) = Self::first_photo(google_client, &results, destination) {
            return Ok(photo);
        }

        log::debug!("No landmark photo for {:?}, retrying with plain query", destination);

        match google_client.text_search(destination, None).await {
            Ok(results) => {
                if let Some(photo) = Self::first_photo(google_client, &results, destination) {
                    return Ok(photo);
                }
            }
            Err(e) => log::warn!("Fallback photo search failed for {:?}: {}", destination, e),
        }

        Err(TravelError::NotFound(
            "No photos found for this destination".to_string(),
        ))
    }

    fn first_photo(
        google_client: &GooglePlacesClient,
        results: &[GooglePlace],
        destination: &str,
    ) -> Option<DestinationPhotoResponse> {
        results.iter().find_map(|place| {
            let reference = place.first_photo_reference()?;
            Some(DestinationPhotoResponse {
                photo_url: google_client.get_photo_url(reference, PHOTO_MAX_WIDTH),
                place_name: place
                    .name
                    .clone()
                    .unwrap_or_else(|| destination.to_string()),
                photo_reference: reference.to_string(),
            })
        })
    }

    /// Search places for each interest around a destination
    /// DOCUMENTATION: Geocodes the destination once (best effort), then runs
    /// one text search per interest concurrently. Output keeps interest order;
    /// an interest whose search fails is left out.
    pub async fn search_by_interests(
        google_client: &GooglePlacesClient,
        destination: &str,
        interests: &[String],
    ) -> CategorizedResults {
        let center = match google_client.geocode(destination).await {
            Ok(point) => Some(point),
            Err(e) => {
                log::warn!("Could not geocode {:?}, searching without location bias: {}", destination, e);
                None
            }
        };

        let searches = interests
            .iter()
            .map(|interest| Self::search_category(google_client, destination, interest, center));
        let outcomes = join_all(searches).await;

        let mut categorized = CategorizedResults::new();
        for (interest, outcome) in interests.iter().zip(outcomes) {
            match outcome {
                Ok(places) => categorized.extend_category(interest, places),
                Err(e) => log::warn!("Skipping interest {:?}: {}", interest, e),
            }
        }

        if categorized.is_empty() {
            log::warn!("Search for {:?} produced no categories", destination);
        } else {
            log::info!(
                "Search for {:?} produced {} categories",
                destination,
                categorized.len()
            );
        }
        categorized
    }

    async fn search_category(
        google_client: &GooglePlacesClient,
        destination: &str,
        interest: &str,
        center: Option<Point<f64>>,
    ) -> Result<Vec<PlaceResult>, TravelError> {
        let query = Self::interest_query(interest, destination);
        let bias = center.map(|point| (point, SEARCH_BIAS_RADIUS_M));

        let results = google_client.text_search(&query, bias).await?;
        Ok(Self::filter_results(
            google_client,
            &results,
            destination,
            center.is_some(),
        ))
    }

    /// Rewrite an interest label into a text search phrase
    /// DOCUMENTATION: Case-insensitive substring rules, first match wins
    pub fn interest_query(interest: &str, destination: &str) -> String {
        let label = interest.to_lowercase();

        if label.contains("nature") || label.contains("park") {
            format!("parks nature reserves {}", destination)
        } else if label.contains("nightlife") {
            format!("bars clubs nightlife {}", destination)
        } else if label.contains("beach") {
            format!("beaches {}", destination)
        } else if label.contains("landmark") {
            format!("landmarks monuments {}", destination)
        } else if label == GENERAL_INTEREST {
            destination.to_string()
        } else {
            format!("{} in {}", interest, destination)
        }
    }

    /// Reshape provider results for one category
    /// DOCUMENTATION: Drops nameless and repeated names (first wins). When the
    /// search was location-biased, also drops results whose address does not
    /// mention the destination.
    pub fn filter_results(
        google_client: &GooglePlacesClient,
        results: &[GooglePlace],
        destination: &str,
        location_biased: bool,
    ) -> Vec<PlaceResult> {
        let destination_lower = destination.to_lowercase();
        let mut seen_names: HashSet<String> = HashSet::new();
        let mut places = Vec::new();

        for place in results {
            let Some(name) = place.name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            if seen_names.contains(name) {
                continue;
            }

            if location_biased {
                let address = place
                    .formatted_address
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase();
                if !address.contains(&destination_lower) {
                    continue;
                }
            }

            seen_names.insert(name.to_string());
            places.push(PlaceResult {
                name: name.to_string(),
                address: place.formatted_address.clone(),
                rating: place.rating,
                open_now: place.opening_hours.as_ref().and_then(|hours| hours.open_now),
                photo_url: place
                    .first_photo_reference()
                    .map(|reference| google_client.get_photo_url(reference, PHOTO_MAX_WIDTH)),
                user_ratings_total: place.user_ratings_total,
                price_level: place.price_level,
            });
        }

        places
    }

    /// City autocomplete
    pub async fn autocomplete(
        google_client: &GooglePlacesClient,
        query: &str,
    ) -> Result<Vec<Value>, TravelError> {
        google_client.autocomplete_cities(query).await.map_err(|e| {
            log::warn!("Autocomplete failed for {:?}: {}", query, e);
            TravelError::Upstream("Failed to fetch autocomplete suggestions".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn client() -> GooglePlacesClient {
        GooglePlacesClient::new(
            "test_key".to_string(),
            "https://maps.example.com/api".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn places(value: serde_json::Value) -> Vec<GooglePlace> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_interest_query_rewriting() {
        assert_eq!(
            PlaceService::interest_query("Beautiful Parks", "Oslo"),
            "parks nature reserves Oslo"
        );
        assert_eq!(
            PlaceService::interest_query("Nature walks", "Oslo"),
            "parks nature reserves Oslo"
        );
        assert_eq!(
            PlaceService::interest_query("NIGHTLIFE", "Oslo"),
            "bars clubs nightlife Oslo"
        );
        assert_eq!(PlaceService::interest_query("Beaches", "Oslo"), "beaches Oslo");
        assert_eq!(
            PlaceService::interest_query("Landmarks", "Oslo"),
            "landmarks monuments Oslo"
        );
        assert_eq!(PlaceService::interest_query("General", "Oslo"), "Oslo");
        assert_eq!(PlaceService::interest_query("food", "Oslo"), "food in Oslo");
    }

    #[test]
    fn test_interest_query_precedence() {
        // "park" wins over "nightlife" and "beach"
        assert_eq!(
            PlaceService::interest_query("beach park nightlife", "Nice"),
            "parks nature reserves Nice"
        );
        assert_eq!(
            PlaceService::interest_query("beach nightlife", "Nice"),
            "bars clubs nightlife Nice"
        );
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let results = places(json!([
            {"name": "Cafe A", "formatted_address": "1 Main St", "rating": 4.1},
            {"name": "Cafe B"},
            {"name": "Cafe A", "formatted_address": "2 Other St", "rating": 3.0},
            {"formatted_address": "nameless"}
        ]));

        let filtered = PlaceService::filter_results(&client(), &results, "Rome", false);

        let names: Vec<&str> = filtered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cafe A", "Cafe B"]);
        assert_eq!(filtered[0].address.as_deref(), Some("1 Main St"));
        assert_eq!(filtered[0].rating, Some(4.1));
    }

    #[test]
    fn test_address_filter_only_with_location_bias() {
        let results = places(json!([
            {"name": "Colosseum", "formatted_address": "Piazza del Colosseo, ROME, Italy"},
            {"name": "Far Away", "formatted_address": "Naples, Italy"},
            {"name": "No Address"}
        ]));

        let biased = PlaceService::filter_results(&client(), &results, "Rome", true);
        assert_eq!(biased.len(), 1);
        assert_eq!(biased[0].name, "Colosseum");

        let unbiased = PlaceService::filter_results(&client(), &results, "Rome", false);
        assert_eq!(unbiased.len(), 3);
    }

    #[test]
    fn test_place_result_fields_pass_through() {
        let results = places(json!([{
            "name": "Trattoria",
            "formatted_address": "Via Roma 1",
            "rating": 4.6,
            "user_ratings_total": 812,
            "price_level": 2,
            "opening_hours": {"open_now": false},
            "photos": [{"photo_reference": "ref-1"}]
        }]));

        let filtered = PlaceService::filter_results(&client(), &results, "Rome", false);

        assert_eq!(
            filtered[0],
            PlaceResult {
                name: "Trattoria".to_string(),
                address: Some("Via Roma 1".to_string()),
                rating: Some(4.6),
                open_now: Some(false),
                photo_url: Some(
                    "https://maps.example.com/api/place/photo?maxwidth=400&photoreference=ref-1&key=test_key"
                        .to_string()
                ),
                user_ratings_total: Some(812),
                price_level: Some(2),
            }
        );
    }
}

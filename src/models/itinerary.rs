// src/models/itinerary.rs
// DOCUMENTATION: Itinerary request/response models
// PURPOSE: Input normalization for itinerary generation and the typed day plan

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for POST /api/itinerary
/// DOCUMENTATION: Mirrors what the planner front-end posts. Either `places`
/// (flat list) or `selectedPlaces` (category -> places) carries the user's picks.
#[derive(Debug, Default, Deserialize)]
pub struct ItineraryRequest {
    #[serde(default)]
    pub destination: Option<String>,

    /// Days; a number or a numeric string, anything falsy means 1
    #[serde(default)]
    pub trip_length: Option<Value>,

    /// Trip vibe (e.g. "relaxed", "adventure")
    #[serde(default)]
    pub trip_type: Option<String>,

    #[serde(default)]
    pub interests: Option<Vec<String>>,

    /// Flat list of places; takes precedence over `selectedPlaces` whenever
    /// the key is sent, even as null
    #[serde(default, deserialize_with = "present")]
    pub places: Option<Value>,

    /// Category -> places; only read when it is an object
    #[serde(default, rename = "selectedPlaces")]
    pub selected_places: Option<Value>,
}

/// A sent key, `null` included, deserializes to `Some`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A place picked by the user
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SelectedPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ItineraryRequest {
    /// Trimmed destination ("" when absent)
    pub fn destination(&self) -> &str {
        self.destination.as_deref().unwrap_or("").trim()
    }

    /// Trip length as it should appear in the prompt
    pub fn duration(&self) -> String {
        match &self.trip_length {
            Some(Value::Number(n)) if n.as_f64().map_or(false, |v| v != 0.0) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => "1".to_string(),
        }
    }

    /// Trip length as a day count, when it can be read as one
    pub fn duration_days(&self) -> Option<u32> {
        self.duration().trim().parse().ok()
    }

    /// Trip vibe, "general" when not given
    pub fn vibe(&self) -> &str {
        match self.trip_type.as_deref() {
            Some(vibe) if !vibe.is_empty() => vibe,
            _ => "general",
        }
    }

    /// Flatten the user's picks to `{name, address, category}` entries
    /// DOCUMENTATION: `places` wins when the key was sent; otherwise every
    /// category of `selectedPlaces` is walked in order. Unreadable entries and
    /// categories are skipped.
    pub fn flat_places(&self) -> Vec<SelectedPlace> {
        if let Some(places) = &self.places {
            return Self::read_places(places, None);
        }

        let Some(selected) = self.selected_places.as_ref().and_then(Value::as_object) else {
            if self.selected_places.as_ref().map_or(false, |v| !v.is_null()) {
                log::warn!("Ignoring selectedPlaces that is not an object");
            }
            return Vec::new();
        };

        selected
            .iter()
            .flat_map(|(category, places)| Self::read_places(places, Some(category)))
            .collect()
    }

    fn read_places(places: &Value, category: Option<&str>) -> Vec<SelectedPlace> {
        let Some(entries) = places.as_array() else {
            if !places.is_null() {
                log::warn!("Ignoring place list that is not an array (category {:?})", category);
            }
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| match SelectedPlace::deserialize(entry) {
                Ok(place) => Some(match category {
                    Some(category) => SelectedPlace {
                        category: Some(category.to_string()),
                        ..place
                    },
                    None => place,
                }),
                Err(e) => {
                    log::warn!("Ignoring unreadable place entry: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Attraction names for the prompt
    /// DOCUMENTATION: Names of the flattened places if there are any, the raw
    /// interest list otherwise
    pub fn attractions(&self) -> Vec<String> {
        let places = self.flat_places();
        if !places.is_empty() {
            return places.into_iter().filter_map(|p| p.name).collect();
        }
        self.interests.clone().unwrap_or_default()
    }
}

/// Day-by-day plan produced by the text provider
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Itinerary {
    pub days: Vec<ItineraryDay>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ItineraryDay {
    pub day: u32,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Activity {
    pub time: String,
    pub name: String,
    pub description: String,
    pub tips: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
}

/// Response body for POST /api/itinerary
/// DOCUMENTATION: `itinerary` is always present (null on failure); `raw`
/// only accompanies a parse failure
#[derive(Debug, Serialize, PartialEq)]
pub struct ItineraryResponse {
    pub itinerary: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ItineraryResponse {
    pub fn generated(itinerary: Value) -> Self {
        Self {
            itinerary: Some(itinerary),
            error: None,
            raw: None,
        }
    }

    pub fn invalid_json(error: String, raw: String) -> Self {
        Self {
            itinerary: None,
            error: Some(error),
            raw: Some(raw),
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            itinerary: None,
            error: Some(error),
            raw: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ItineraryRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_selected_places_are_flattened() {
        let req = request(json!({
            "destination": "Kyoto",
            "selectedPlaces": {"food": [{"name": "Cafe A", "address": "123 St"}]}
        }));

        assert_eq!(
            req.flat_places(),
            vec![SelectedPlace {
                name: Some("Cafe A".to_string()),
                address: Some("123 St".to_string()),
                category: Some("food".to_string()),
            }]
        );
        assert_eq!(req.attractions(), vec!["Cafe A".to_string()]);
    }

    #[test]
    fn test_selected_places_keep_category_order() {
        let req = request(json!({
            "selectedPlaces": {
                "museums": [{"name": "Louvre"}],
                "food": [{"name": "Bistro"}, {"name": "Creperie"}]
            }
        }));

        assert_eq!(req.attractions(), vec!["Louvre", "Bistro", "Creperie"]);
    }

    #[test]
    fn test_places_take_precedence() {
        let req = request(json!({
            "places": [{"name": "Tower", "rating": 4.7, "photo_url": null}],
            "selectedPlaces": {"food": [{"name": "Cafe A"}]},
            "interests": ["history"]
        }));

        assert_eq!(req.attractions(), vec!["Tower".to_string()]);
    }

    #[test]
    fn test_attractions_fall_back_to_interests() {
        let req = request(json!({
            "places": [],
            "interests": ["nightlife", "beach"]
        }));

        assert_eq!(req.attractions(), vec!["nightlife", "beach"]);
    }

    #[test]
    fn test_malformed_picks_are_tolerated() {
        let req = request(json!({
            "selectedPlaces": [],
            "interests": ["museums"]
        }));
        assert!(req.flat_places().is_empty());
        assert_eq!(req.attractions(), vec!["museums"]);

        let req = request(json!({
            "selectedPlaces": {
                "food": "not a list",
                "parks": [{"name": "Retiro"}, 42, {"name": ["bad"]}]
            }
        }));
        assert_eq!(req.attractions(), vec!["Retiro"]);

        let req = request(json!({"places": [{"name": "Tower"}, "junk"]}));
        assert_eq!(req.attractions(), vec!["Tower"]);
    }

    #[test]
    fn test_null_places_still_take_precedence() {
        let req = request(json!({
            "places": null,
            "selectedPlaces": {"food": [{"name": "Cafe A"}]},
            "interests": ["history"]
        }));

        assert!(req.flat_places().is_empty());
        assert_eq!(req.attractions(), vec!["history"]);
    }

    #[test]
    fn test_duration_defaults() {
        assert_eq!(request(json!({})).duration(), "1");
        assert_eq!(request(json!({"trip_length": 0})).duration(), "1");
        assert_eq!(request(json!({"trip_length": ""})).duration(), "1");
        assert_eq!(request(json!({"trip_length": null})).duration(), "1");
        assert_eq!(request(json!({"trip_length": 4})).duration(), "4");
        assert_eq!(request(json!({"trip_length": "3"})).duration(), "3");
        assert_eq!(request(json!({"trip_length": "3"})).duration_days(), Some(3));
    }

    #[test]
    fn test_vibe_defaults_to_general() {
        assert_eq!(request(json!({})).vibe(), "general");
        assert_eq!(request(json!({"trip_type": "romantic"})).vibe(), "romantic");
    }

    #[test]
    fn test_failed_response_has_no_raw() {
        let value = serde_json::to_value(ItineraryResponse::failed("boom".to_string())).unwrap();
        assert_eq!(value, json!({"itinerary": null, "error": "boom"}));
    }
}

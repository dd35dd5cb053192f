// src/services/itinerary_service.rs
// DOCUMENTATION: Itinerary generation
// PURPOSE: Build the planner prompt, call Gemini and recover JSON from its reply

use crate::models::{Itinerary, ItineraryRequest, ItineraryResponse};
use crate::services::GeminiClient;
use serde_json::Value;

pub struct ItineraryService;

/// Prompt inputs after request normalization
#[derive(Debug, Clone, PartialEq)]
pub struct PromptInput {
    pub destination: String,
    pub duration: String,
    pub vibes: Vec<String>,
    pub attractions: Vec<String>,
}

impl PromptInput {
    pub fn from_request(req: &ItineraryRequest) -> Self {
        Self {
            destination: req.destination().to_string(),
            duration: req.duration(),
            vibes: vec![req.vibe().to_string()],
            attractions: req.attractions(),
        }
    }
}

const EXAMPLE_ITINERARY: &str = r#"{
  "days": [
    {
      "day": 1,
      "activities": [
        {
          "time": "9:00 AM - 11:00 AM",
          "name": "Attraction Name",
          "description": "Short description",
          "tips": "Local tip",
          "photo_url": "https://example.com/photo.jpg",
          "cost": "$20"
        }
      ]
    }
  ]
}"#;

impl ItineraryService {
    /// Generate an itinerary
    /// DOCUMENTATION: Never fails; provider and parse failures are reported in
    /// the response body
    pub async fn generate(gemini: &GeminiClient, req: &ItineraryRequest) -> ItineraryResponse {
        let input = PromptInput::from_request(req);
        let prompt = Self::build_prompt(&input);

        log::info!(
            "Generating {}-day itinerary for {:?} with {} attractions",
            input.duration,
            input.destination,
            input.attractions.len()
        );

        let text = match gemini.generate_text(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Itinerary generation failed: {}", e);
                return ItineraryResponse::failed(e.to_string());
            }
        };

        let response = Self::parse_generated(&text);
        if let Some(itinerary) = &response.itinerary {
            Self::check_shape(itinerary, req.duration_days());
        }
        response
    }

    /// Planner prompt
    /// DOCUMENTATION: Asks for a bare JSON object with exactly `duration` days
    /// of 3-5 activities each
    pub fn build_prompt(input: &PromptInput) -> String {
        let vibes = if input.vibes.is_empty() {
            "None".to_string()
        } else {
            input.vibes.join(", ")
        };
        let attractions = if input.attractions.is_empty() {
            "None".to_string()
        } else {
            input.attractions.join(", ")
        };

        format!(
            r#"
You are a travel planner that creates detailed, daily itineraries. Return ONLY valid JSON - no markdown, no code blocks, no explanations.

USER INFO:
Destination: {destination}
Trip Duration: {duration} days
Vibe/General Interests: {vibes}
Specific Attractions: {attractions}

REQUIREMENTS:
1. Generate exactly {duration} days.
2. Each day must have 3-5 activities with:
   - time (e.g., "9:00 AM - 11:00 AM")
   - name
   - description
   - tips (local tip)
   - optional photo_url
   - optional cost
3. Include specific attractions if provided; otherwise use general interests.
4. Return ONLY the JSON object - no markdown code blocks, no explanations, no extra text.

Expected JSON structure:
{example}

Return only the JSON object above, nothing else.
"#,
            destination = input.destination,
            duration = input.duration,
            vibes = vibes,
            attractions = attractions,
            example = EXAMPLE_ITINERARY,
        )
    }

    /// Strip code fences and surrounding prose from generated text
    pub fn clean_generated_text(text: &str) -> &str {
        let mut cleaned = text.trim();

        if let Some(rest) = cleaned.strip_prefix("```json") {
            cleaned = rest;
        } else if let Some(rest) = cleaned.strip_prefix("```") {
            cleaned = rest;
        }
        if let Some(rest) = cleaned.strip_suffix("```") {
            cleaned = rest;
        }
        cleaned = cleaned.trim();

        // first '{' to last '}'
        if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
            if end > start {
                cleaned = &cleaned[start..=end];
            }
        }

        cleaned
    }

    /// Recover the itinerary object from generated text
    /// DOCUMENTATION: On failure the cleaned text is returned as `raw`
    pub fn parse_generated(text: &str) -> ItineraryResponse {
        let cleaned = Self::clean_generated_text(text);

        match serde_json::from_str::<Value>(cleaned) {
            Ok(itinerary) => ItineraryResponse::generated(itinerary),
            Err(e) => {
                log::warn!("Generated itinerary is not valid JSON: {}", e);
                log::debug!("Unparsable itinerary text: {}", cleaned);
                ItineraryResponse::invalid_json(
                    format!("AI did not return valid JSON: {}", e),
                    cleaned.to_string(),
                )
            }
        }
    }

    /// Compare the parsed object with the typed model; mismatches are only logged
    fn check_shape(itinerary: &Value, expected_days: Option<u32>) {
        match serde_json::from_value::<Itinerary>(itinerary.clone()) {
            Ok(parsed) => {
                if let Some(expected) = expected_days {
                    if parsed.days.len() != expected as usize {
                        log::warn!(
                            "Itinerary has {} days, {} were requested",
                            parsed.days.len(),
                            expected
                        );
                    }
                }
            }
            Err(e) => log::warn!("Itinerary does not match the expected day plan shape: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_reply_with_prose() {
        let response = ItineraryService::parse_generated("Sure! ```json\n{\"days\":[]}\n``` Enjoy!");
        assert_eq!(response, ItineraryResponse::generated(json!({"days": []})));
    }

    #[test]
    fn test_leading_json_fence() {
        let text = "```json\n{\"days\": [{\"day\": 1, \"activities\": []}]}\n```";
        assert_eq!(
            ItineraryService::clean_generated_text(text),
            "{\"days\": [{\"day\": 1, \"activities\": []}]}"
        );
    }

    #[test]
    fn test_bare_fence() {
        let text = "  ```\n{\"days\": []}\n```  ";
        assert_eq!(ItineraryService::clean_generated_text(text), "{\"days\": []}");
    }

    #[test]
    fn test_text_without_braces_is_kept() {
        assert_eq!(
            ItineraryService::clean_generated_text("no json here"),
            "no json here"
        );
        // closing brace before opening brace: no slicing
        assert_eq!(ItineraryService::clean_generated_text("} oops {"), "} oops {");
    }

    #[test]
    fn test_invalid_json_keeps_raw_text() {
        let response = ItineraryService::parse_generated("Here you go: {days: [1, 2,]}");

        assert!(response.itinerary.is_none());
        let error = response.error.unwrap();
        assert!(error.starts_with("AI did not return valid JSON:"));
        assert_eq!(response.raw.as_deref(), Some("{days: [1, 2,]}"));

        let serialized = serde_json::to_value(ItineraryResponse::invalid_json(
            "bad".to_string(),
            "raw".to_string(),
        ))
        .unwrap();
        assert_eq!(serialized, json!({"itinerary": null, "error": "bad", "raw": "raw"}));
    }

    #[test]
    fn test_prompt_lists_selected_places() {
        let req: ItineraryRequest = serde_json::from_value(json!({
            "destination": "Lisbon",
            "trip_length": 3,
            "trip_type": "relaxed",
            "selectedPlaces": {"food": [{"name": "Cafe A", "address": "123 St"}]}
        }))
        .unwrap();

        let input = PromptInput::from_request(&req);
        assert_eq!(input.attractions, vec!["Cafe A".to_string()]);

        let prompt = ItineraryService::build_prompt(&input);
        assert!(prompt.contains("Destination: Lisbon"));
        assert!(prompt.contains("Trip Duration: 3 days"));
        assert!(prompt.contains("Generate exactly 3 days."));
        assert!(prompt.contains("Vibe/General Interests: relaxed"));
        assert!(prompt.contains("Specific Attractions: Cafe A"));
        assert!(prompt.contains("\"days\": ["));
    }

    #[test]
    fn test_prompt_without_attractions() {
        let req: ItineraryRequest = serde_json::from_value(json!({"destination": "Oslo"})).unwrap();
        let prompt = ItineraryService::build_prompt(&PromptInput::from_request(&req));

        assert!(prompt.contains("Trip Duration: 1 days"));
        assert!(prompt.contains("Vibe/General Interests: general"));
        assert!(prompt.contains("Specific Attractions: None"));
    }
}

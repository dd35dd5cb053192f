// src/services/gemini_client.rs
// DOCUMENTATION: Gemini generateContent client
// PURPOSE: Turn a prompt into free text for itinerary generation

use crate::config::Config;
use crate::errors::TravelError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini text client
/// DOCUMENTATION: Built once at startup; holds the key and model name
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    /// Request `application/json` output from the model
    json_mode: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        json_mode: bool,
        timeout: Duration,
    ) -> Result<Self, TravelError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TravelError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            json_mode,
        })
    }

    /// Build the client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, TravelError> {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            config.gemini_json_mode,
            config.request_timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a single-turn prompt
    /// DOCUMENTATION: Returns the concatenated text parts of the first
    /// candidate. A blocked prompt or an empty candidate is an error.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, TravelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: self.json_mode.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        log::debug!(
            "Sending request to Gemini: model={}, prompt_len={}",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                log::error!("Gemini request failed: {}", e);
                TravelError::from(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API error {}: {}", status, body);

            if status.as_u16() == 429 {
                return Err(TravelError::RateLimitExceeded);
            }
            return Err(TravelError::ExternalApiError(format!(
                "Gemini API error {}",
                status
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TravelError::ExternalApiError(format!("Parse error: {}", e.without_url())))?;

        if let Some(reason) = api_response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(TravelError::ExternalApiError(format!(
                "Prompt blocked by Gemini: {}",
                reason
            )));
        }

        let candidate = api_response.candidates.into_iter().next().ok_or_else(|| {
            TravelError::ExternalApiError("Gemini returned no candidates".to_string())
        })?;

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(TravelError::ExternalApiError(format!(
                "Gemini returned no text (finish reason: {})",
                reason
            )));
        }

        log::info!("Gemini returned {} characters", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(base_url: &str, json_mode: bool) -> GeminiClient {
        GeminiClient::new(
            "test_key".to_string(),
            "gemini-2.0-flash".to_string(),
            base_url.to_string(),
            json_mode,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_text_joins_parts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-2.0-flash:generateContent")
                    .query_param("key", "test_key")
                    .body_contains("Plan a trip");
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "{\"days\":"}, {"text": "[]}"}]},
                        "finishReason": "STOP"
                    }]
                }));
            })
            .await;

        let text = client(&server.base_url(), false)
            .generate_text("Plan a trip")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "{\"days\":[]}");
    }

    #[tokio::test]
    async fn test_json_mode_sets_mime_type() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).body_contains("\"responseMimeType\":\"application/json\"");
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "{}"}]}}]
                }));
            })
            .await;

        let result = client(&server.base_url(), true).generate_text("x").await;

        mock.assert_async().await;
        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).body("slow down");
            })
            .await;

        let result = client(&server.base_url(), false).generate_text("x").await;
        assert!(matches!(result, Err(TravelError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "candidates": [],
                    "promptFeedback": {"blockReason": "SAFETY"}
                }));
            })
            .await;

        let err = client(&server.base_url(), false)
            .generate_text("x")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }
}

//! Google AI Studio (Gemini) API Integration
//!
//! Calls `generateContent` on the configured model and returns the text of
//! the first candidate.

use crate::{LlmError, LlmResult, TextGenerator};
use async_trait::async_trait;
use aura_utils::ModelSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key; the key never goes into the URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Request structure for Gemini API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Response structure from Gemini API
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
    timeout_secs: u64,
    client: Client,
}

impl GeminiClient {
    /// Create a client from the `[model]` settings; the API key is required
    pub fn from_settings(settings: &ModelSettings) -> LlmResult<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| LlmError::Config("Gemini API key is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: settings.name.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            timeout_secs: settings.timeout_secs,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> LlmResult<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                max_output_tokens: Some(self.max_output_tokens),
            }),
        };

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        seconds: self.timeout_secs,
                    }
                } else {
                    LlmError::Inference(format!("Gemini API request failed: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Inference(format!(
                "Gemini API error ({status}): {error_text}"
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| {
                LlmError::Inference(format!("Failed to parse Gemini response: {}", e.without_url()))
            })?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> ModelSettings {
        ModelSettings {
            api_key: Some("test-key".to_string()),
            name: "gemini-2.5-flash".to_string(),
            base_url: server.uri(),
            timeout_secs: 5,
            ..ModelSettings::default()
        }
    }

    #[test]
    fn test_requires_api_key() {
        let result = GeminiClient::from_settings(&ModelSettings::default());
        assert!(matches!(result, Err(LlmError::Config(_))));
    }

    #[tokio::test]
    async fn test_generation_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gemini-2.5-flash:generateContent"))
            .and(header(API_KEY_HEADER, "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "Summarize KSFO"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "<div>VFR along the route</div>"}]}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::from_settings(&settings_for(&server)).expect("client");
        let text = client.generate("Summarize KSFO").await.expect("generated");
        assert_eq!(text, "<div>VFR along the route</div>");

        let requests = server.received_requests().await.expect("recording enabled");
        assert!(requests.iter().all(|r| r.url.query().is_none()));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let settings = ModelSettings {
            api_key: Some("SECRET-KEY-123".to_string()),
            base_url: format!("http://127.0.0.1:{port}"),
            timeout_secs: 5,
            ..ModelSettings::default()
        };

        let client = GeminiClient::from_settings(&settings).expect("client");
        let err = client.generate("prompt").await.unwrap_err();

        assert!(matches!(err, LlmError::Inference(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }

    #[tokio::test]
    async fn test_malformed_body_error_hides_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = GeminiClient::from_settings(&settings_for(&server)).expect("client");
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::Inference(ref msg) if msg.contains("parse")));
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_generation_config_is_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "generationConfig": {"maxOutputTokens": 2048}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::from_settings(&settings_for(&server)).expect("client");
        assert_eq!(client.generate("prompt").await.expect("generated"), "ok");
    }

    #[tokio::test]
    async fn test_quota_error_is_inference_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
            .mount(&server)
            .await;

        let client = GeminiClient::from_settings(&settings_for(&server)).expect("client");
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::Inference(ref msg) if msg.contains("429")));
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = GeminiClient::from_settings(&settings_for(&server)).expect("client");
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    #[ignore] // Requires API key
    async fn test_live_gemini_generation() {
        let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set for this test");
        let settings = ModelSettings {
            api_key: Some(api_key),
            ..ModelSettings::default()
        };

        let client = GeminiClient::from_settings(&settings).expect("client");
        let text = client
            .generate("What is 2+2? Answer with just the number.")
            .await
            .expect("generated");
        assert!(text.contains('4'));
    }
}

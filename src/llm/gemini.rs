//! Gemini adapter — non-streaming `generateContent` via the Google AI API.
//!
//! Notes on the API shape:
//! - API key goes in a URL query param, not a header
//! - reply text lives in `candidates[0].content.parts[0].text`
//! - quota exhaustion comes back as HTTP 429 and is surfaced as its own
//!   error variant so the UI can say "wait and retry"

use super::ModelClient;
use crate::config::GenerationConfig;
use crate::error::LlmError;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    generation: GenerationConfig,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, generation: GenerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            generation,
        }
    }
}

#[async_trait::async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let start = std::time::Instant::now();
        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "contents": [
                    {
                        "role": "user",
                        "parts": [{ "text": prompt }]
                    }
                ],
                "generationConfig": self.generation,
            }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            log::warn!("[LLM] Gemini rate limit hit (429)");
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!(
                "[LLM] Gemini API returned {}: {}",
                status,
                &body[..body.len().min(200)]
            );
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        let text = extract_candidate_text(&body).ok_or(LlmError::EmptyResponse)?;

        log::info!(
            "[LLM] Model: {} — {} chars in {}ms",
            self.model,
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}

/// Pull the reply text out of a `generateContent` response body.
fn extract_candidate_text(body: &serde_json::Value) -> Option<String> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_candidate_payload() {
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "hello" } ] } }
            ]
        });
        assert_eq!(extract_candidate_text(&body).as_deref(), Some("hello"));
    }

    #[test]
    fn missing_candidates_yield_none() {
        let body = serde_json::json!({ "promptFeedback": {} });
        assert!(extract_candidate_text(&body).is_none());
    }
}

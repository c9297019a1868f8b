//! Generative-text API client (Gemini-style generateContent endpoint).

use serde::Deserialize;
use serde_json::json;

use super::send_with_retry;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct TextApiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl TextApiClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: super::http_client(),
            endpoint,
            api_key,
        }
    }

    /// Generate text for a single prompt and return the first candidate.
    pub async fn generate(&self, prompt: &str) -> ApiResult<String> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = send_with_retry(
            || self.client.post(&url).json(&body),
            "text generation API",
        )
        .await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("invalid text API response: {}", e)))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                ApiError::Upstream("text generation API returned no candidates".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_content_response() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "A serene mountain lake at dawn"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.candidates[0].content.parts[0].text,
            "A serene mountain lake at dawn"
        );
    }
}

//! Image-generation API client (Lambda-fronted upstream).

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::send_with_retry;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct ImageApiClient {
    client: reqwest::Client,
    endpoint: String,
}

/// Result of a generation call: the upstream answers with either inline
/// base64 data or a URL to fetch, depending on which backend served it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_data: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamImageResponse {
    image_data: Option<String>,
    s3_url: Option<String>,
    #[serde(rename = "image_link")]
    image_link: Option<String>,
    image_url: Option<String>,
    url: Option<String>,
}

impl ImageApiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: super::http_client(),
            endpoint,
        }
    }

    pub async fn generate(&self, prompt: &str) -> ApiResult<GeneratedImage> {
        let body = json!({
            "function": "generate-image",
            "prompt": prompt,
        });

        let response = send_with_retry(
            || self.client.post(&self.endpoint).json(&body),
            "image generation API",
        )
        .await?;

        let upstream: UpstreamImageResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("invalid image API response: {}", e)))?;

        // Prefer inline base64; strip a data-URL prefix when present.
        if let Some(data) = upstream.image_data.filter(|d| !d.is_empty()) {
            let base64 = match data.split_once("base64,") {
                Some((_, rest)) => rest.to_string(),
                None => data,
            };
            return Ok(GeneratedImage {
                image_data: Some(base64),
                image_url: None,
            });
        }

        let url = upstream
            .s3_url
            .or(upstream.image_link)
            .or(upstream.image_url)
            .or(upstream.url);

        match url {
            Some(url) => Ok(GeneratedImage {
                image_data: None,
                image_url: Some(url),
            }),
            None => Err(ApiError::Upstream(
                "invalid response format from image generation API".to_string(),
            )),
        }
    }
}

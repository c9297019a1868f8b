//! Proxy routes for the third-party generation services: prompt/meta text
//! through the text API, image synthesis through the Lambda-fronted image API.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::clients::image_api::GeneratedImage;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptRequest {
    pub category_name: String,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub category_image: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePromptResponse {
    pub message: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub message: String,
    #[serde(flatten)]
    pub image: GeneratedImage,
}

/// Build the instruction sent to the text API for a prompt-generation kind.
pub(crate) fn render_prompt_template(request: &GeneratePromptRequest) -> String {
    let name = &request.category_name;
    match request.kind.as_deref() {
        Some("prompt") | None => format!(
            "create a unique and professional single prompt of 15-20 words that will generate \
             a beautiful image for {}. Just return the prompt. Do not include any explanations, \
             or additional text.",
            name
        ),
        Some("meta") => {
            let slug = request.category_slug.as_deref().unwrap_or_default();
            let image = request.category_image.as_deref().unwrap_or_default();
            format!(
                "You are an expert SEO assistant. Generate a fully optimized <head> HTML section \
                 for an AI tool web page named {name}, canonical URL https://www.airbrush.ai/{slug}, \
                 og/twitter image {image}. Include title, description, keywords, canonical link, \
                 Open Graph and Twitter Card tags, and a WebApplication JSON-LD block. Return only \
                 the full <head>...</head> HTML with values filled in."
            )
        }
        Some("blog_content") => format!(
            "create a unique blog content of 350-400 words related to the topic {}",
            name
        ),
        Some(_) => request
            .prompt
            .clone()
            .unwrap_or_else(|| format!("Write a short description for {}", name)),
    }
}

/// POST /api/images/generate-prompt
async fn generate_prompt(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePromptRequest>,
) -> ApiResult<Json<GeneratePromptResponse>> {
    if payload.category_name.trim().is_empty() {
        return Err(ApiError::Validation("Category name is required".to_string()));
    }

    let instruction = render_prompt_template(&payload);
    let prompt = state.text_client.generate(&instruction).await?;

    Ok(Json(GeneratePromptResponse {
        message: "Prompt generated successfully".to_string(),
        prompt,
    }))
}

/// POST /api/images/generate
async fn generate_image(
    State(state): State<AppState>,
    Json(payload): Json<GenerateImageRequest>,
) -> ApiResult<Json<GenerateImageResponse>> {
    if payload.prompt.trim().is_empty() {
        return Err(ApiError::Validation("Prompt is required".to_string()));
    }

    // Strip the "**Prompt:**" prefix some prompt generations carry.
    let cleaned = match payload.prompt.split_once("**Prompt:**") {
        Some((_, rest)) => rest.trim(),
        None => payload.prompt.trim(),
    };

    let image = state.image_client.generate(cleaned).await?;

    Ok(Json(GenerateImageResponse {
        message: "Image generated successfully".to_string(),
        image,
    }))
}

pub fn create_image_router(state: AppState) -> Router {
    Router::new()
        .route("/api/images/generate-prompt", post(generate_prompt))
        .route("/api/images/generate", post(generate_image))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: Option<&str>) -> GeneratePromptRequest {
        GeneratePromptRequest {
            category_name: "3D Render".to_string(),
            category_slug: Some("3d-render".to_string()),
            category_image: None,
            kind: kind.map(str::to_string),
            prompt: None,
        }
    }

    #[test]
    fn test_prompt_template_default_kind() {
        let text = render_prompt_template(&request(None));
        assert!(text.contains("15-20 words"));
        assert!(text.contains("3D Render"));
    }

    #[test]
    fn test_prompt_template_meta_kind() {
        let text = render_prompt_template(&request(Some("meta")));
        assert!(text.contains("https://www.airbrush.ai/3d-render"));
        assert!(text.contains("<head>"));
    }

    #[test]
    fn test_prompt_template_blog_kind() {
        let text = render_prompt_template(&request(Some("blog_content")));
        assert!(text.contains("350-400 words"));
    }

    #[test]
    fn test_prompt_template_custom_falls_through() {
        let mut req = request(Some("custom"));
        req.prompt = Some("my own instruction".to_string());
        assert_eq!(render_prompt_template(&req), "my own instruction");
    }
}

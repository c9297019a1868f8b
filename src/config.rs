//! Environment-derived application configuration.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Public site base used for sitemap `<loc>` entries.
    pub site_url: String,
    pub sitemap_path: PathBuf,
    /// Hour of day (local to `sitemap_utc_offset_hours`) for the scheduled rebuild.
    pub sitemap_refresh_hour: u32,
    pub sitemap_utc_offset_hours: i32,
    pub image_api_url: String,
    pub text_api_url: String,
    pub text_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgresql://localhost:5432/airbrush".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .unwrap_or(8000),
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "https://airbrush.ai".to_string()),
            sitemap_path: std::env::var("SITEMAP_PATH")
                .unwrap_or_else(|_| "public/sitemap.xml".to_string())
                .into(),
            sitemap_refresh_hour: std::env::var("SITEMAP_REFRESH_HOUR")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h| *h < 24)
                .unwrap_or(2),
            sitemap_utc_offset_hours: std::env::var("SITEMAP_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i32| (-12..=14).contains(h))
                .unwrap_or(-5),
            image_api_url: std::env::var("IMAGE_API_URL").unwrap_or_else(|_| {
                "https://kns2nsl3g3.execute-api.us-east-1.amazonaws.com/default/deepInfraImageGeneration"
                    .to_string()
            }),
            text_api_url: std::env::var("TEXT_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
                    .to_string()
            }),
            text_api_key: std::env::var("TEXT_API_KEY").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Relies on a clean test environment; the defaults are what production
    // falls back to when a variable is unset.
    #[test]
    fn test_defaults() {
        let config = AppConfig::from_env();
        assert_eq!(config.site_url, "https://airbrush.ai");
        assert_eq!(config.sitemap_refresh_hour, 2);
        assert_eq!(config.sitemap_utc_offset_hours, -5);
        assert!(config.sitemap_path.ends_with("sitemap.xml"));
    }
}

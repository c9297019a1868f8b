//! Outbound HTTP clients for third-party generation services.
//!
//! Both clients share one bounded retry policy: up to 3 attempts on transport
//! failure or non-success status, base delay doubling between attempts, then
//! UpstreamFailure. No user-facing cancellation is wired through.

pub mod image_api;
pub mod text_api;

use std::time::Duration;

use crate::error::{ApiError, ApiResult};

pub use image_api::ImageApiClient;
pub use text_api::TextApiClient;

const MAX_ATTEMPTS: u32 = 3;
const BASE_DELAY_MS: u64 = 1000;
const REQUEST_TIMEOUT_SECS: u64 = 15;

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "HTTP client builder failed, using default client without timeout");
            reqwest::Client::new()
        })
}

/// Delay before the retry following `attempt` (1-based): base doubling each time.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << (attempt - 1))
}

/// Send a request up to `MAX_ATTEMPTS` times. `build` produces a fresh
/// request per attempt since a `RequestBuilder` is consumed by `send`.
pub(crate) async fn send_with_retry<F>(build: F, what: &str) -> ApiResult<reqwest::Response>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error = String::new();

    for attempt in 1..=MAX_ATTEMPTS {
        match build().send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                last_error = format!("{} returned status {}", what, response.status());
            }
            Err(e) => {
                last_error = format!("{} request failed: {}", what, e);
            }
        }

        if attempt < MAX_ATTEMPTS {
            tracing::warn!(attempt, error = %last_error, "retrying upstream call");
            tokio::time::sleep(backoff_delay(attempt)).await;
        }
    }

    Err(ApiError::Upstream(format!(
        "failed after {} attempts: {}",
        MAX_ATTEMPTS, last_error
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        assert_eq!(backoff_delay(1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(2), Duration::from_millis(2000));
        assert_eq!(backoff_delay(3), Duration::from_millis(4000));
    }

    #[tokio::test]
    async fn test_retry_surfaces_upstream_failure() {
        // unroutable address: every attempt is a transport error
        let client = http_client();
        let result = send_with_retry(
            || client.get("http://127.0.0.1:1/unreachable"),
            "test endpoint",
        )
        .await;

        match result {
            Err(ApiError::Upstream(message)) => {
                assert!(message.contains("3 attempts"), "got: {message}");
            }
            other => panic!("expected UpstreamFailure, got {other:?}"),
        }
    }
}

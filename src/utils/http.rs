// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Longest response excerpt carried into an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// GET a URL and return the body, treating non-2xx statuses as errors.
pub async fn fetch_text(
    client: &reqwest::Client,
    url: reqwest::Url,
    bearer: Option<&str>,
) -> Result<String> {
    let mut request = client.get(url);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let excerpt: String = text.chars().take(ERROR_BODY_LIMIT).collect();
        return Err(AppError::cms(status.as_u16(), excerpt.trim()));
    }
    Ok(text)
}

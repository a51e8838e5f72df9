//! Headless CMS (Strapi) client for marketing content.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use thiserror::Error;

use crate::config::CmsConfig;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned {status} for {content_type}")]
    Status { status: u16, content_type: String },

    #[error("CMS response for {0} has no entry")]
    Empty(String),

    #[error("Invalid CMS configuration: {0}")]
    Config(String),
}

#[derive(Clone, Debug)]
pub struct CmsClient {
    client: reqwest::Client,
    base_url: String,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| CmsError::Config(format!("token is not a valid header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single-type entry and return its attribute object.
    pub async fn fetch_single(&self, content_type: &str) -> Result<Value, CmsError> {
        let url = format!("{}/api/{content_type}?populate=*", self.base_url);
        tracing::debug!(url = %url, "fetching cms content");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                content_type: content_type.to_string(),
            });
        }

        let body: Value = response.json().await?;
        unwrap_entry(body).ok_or_else(|| CmsError::Empty(content_type.to_string()))
    }
}

/// Accepts `{data: {attributes: {..}}}`, `{data: {..}}` and a `data` array
/// (first element wins).
pub fn unwrap_entry(mut body: Value) -> Option<Value> {
    let mut data = body.get_mut("data")?.take();
    if let Value::Array(items) = data {
        data = items.into_iter().next()?;
    }
    let entry = if data.get("attributes").is_some_and(Value::is_object) {
        data.get_mut("attributes")
            .map(Value::take)
            .unwrap_or_default()
    } else {
        data
    };
    entry.is_object().then_some(entry)
}

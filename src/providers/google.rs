//! Google Translate API v2 provider
//!
//! Sends the batch as a plain list of texts with fixed source and target
//! languages and zips the translations, returned in request order, back onto
//! the submitted texts. A batch either translates completely or fails.
//!
//! The API key comes from the configuration or, when absent there, from the
//! `BOG_GOOGLE_APIKEY` environment variable.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app_config::{Config, ProviderKind};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{TranslationProvider, send_error};
use crate::translation::Batch;

/// Google Translate client
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key, `None` when neither config nor environment provide one
    api_key: Option<String>,
    /// Environment variable named in the missing-key error
    api_key_env: String,
    /// API endpoint URL
    endpoint: String,
    /// Source language code sent with every request
    source_language: String,
    /// Target language code sent with every request
    target_language: String,
    /// Maximum texts per request
    max_batch_size: usize,
    /// Request timeout in seconds
    timeout_secs: u64,
}

/// Translate request body
#[derive(Debug, Serialize)]
pub struct GoogleTranslateRequest<'a> {
    /// Texts to translate
    pub q: &'a [String],
    /// Source language code
    pub source: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Plain text, so the service does not HTML-escape the output
    pub format: &'static str,
}

/// Translate response body
#[derive(Debug, Deserialize)]
pub struct GoogleTranslateResponse {
    pub data: GoogleTranslateData,
}

/// Payload of a translate response
#[derive(Debug, Deserialize)]
pub struct GoogleTranslateData {
    #[serde(default)]
    pub translations: Vec<GoogleTranslation>,
}

/// One translated text
#[derive(Debug, Deserialize)]
pub struct GoogleTranslation {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl GoogleTranslate {
    /// Maximum number of texts the API accepts per request
    pub const MAX_BATCH_SIZE: usize = 128;

    /// Create a new client
    pub fn new(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: "BOG_GOOGLE_APIKEY".to_string(),
            endpoint: endpoint.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            max_batch_size: Self::MAX_BATCH_SIZE,
            timeout_secs: 30,
        }
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> Self {
        let mut translation = config.translation.clone();
        translation.provider = ProviderKind::Google;

        let source = language_utils::normalize_to_part1(&config.source_language)
            .unwrap_or_else(|_| config.source_language.clone());
        let target = language_utils::normalize_to_part1(&config.target_language)
            .unwrap_or_else(|_| config.target_language.clone());

        let mut provider = Self::new(translation.get_api_key(), translation.get_endpoint(), source, target)
            .with_timeout(translation.get_timeout_secs())
            .with_max_batch_size(translation.common.max_batch_size);
        provider.api_key_env = translation.get_api_key_env();
        provider
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self.client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        self
    }

    /// Set the maximum number of texts per request, capped by the API limit
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.clamp(1, Self::MAX_BATCH_SIZE);
        self
    }

    /// Build the keyed request URL
    fn request_url(&self, api_key: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(&self.endpoint, &[("key", api_key)])
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))
    }

    /// Translate one request-sized chunk
    async fn translate_chunk(&self, url: &Url, texts: &[String]) -> Result<Vec<String>, ProviderError> {
        let request = GoogleTranslateRequest {
            q: texts,
            source: &self.source_language,
            target: &self.target_language,
            format: "text",
        };

        let response = self
            .client
            .post(url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await.map_err(|e| send_error(e, self.timeout_secs))?;
        parse_translations(&body, texts.len())
    }
}

/// Parse a response body into translations, checking the count
pub fn parse_translations(body: &str, expected: usize) -> Result<Vec<String>, ProviderError> {
    let response: GoogleTranslateResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Invalid translate response: {}", e)))?;

    let translations: Vec<String> = response
        .data
        .translations
        .into_iter()
        .map(|t| t.translated_text)
        .collect();

    if translations.len() != expected {
        return Err(ProviderError::ParseError(format!(
            "Expected {} translations, got {}",
            expected,
            translations.len()
        )));
    }
    Ok(translations)
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    fn name(&self) -> &str {
        ProviderKind::Google.display_name()
    }

    async fn translate(&self, batch: &Batch) -> Result<BTreeMap<String, String>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| ProviderError::MissingApiKey {
            provider: self.name().to_string(),
            env_var: self.api_key_env.clone(),
        })?;

        if batch.is_empty() {
            return Ok(BTreeMap::new());
        }

        let url = self.request_url(api_key)?;
        let mut translated = BTreeMap::new();
        let chunks = batch.chunks(self.max_batch_size);
        let total = chunks.len();

        for (index, chunk) in chunks.into_iter().enumerate() {
            debug!("Sending chunk {}/{} ({} texts) to Google Translate", index + 1, total, chunk.len());
            let results = self.translate_chunk(&url, &chunk).await?;
            translated.extend(chunk.into_iter().zip(results));
        }

        Ok(translated)
    }
}

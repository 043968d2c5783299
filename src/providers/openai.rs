//! OpenAI chat-completion provider
//!
//! A chat model is not a translation API: it may reorder, drop or rename
//! entries. Every text is therefore tagged with a stable 64-bit fingerprint,
//! the model is asked to translate the values of a `fingerprint -> text` JSON
//! object, and translations are matched back by recomputing the fingerprints.
//! Entries the model dropped stay untranslated for this round.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::app_config::{Config, ProviderKind};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{TranslationProvider, send_error};
use crate::translation::Batch;

/// Matches a leading or trailing markdown code fence
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*```[A-Za-z]*\s*|\s*```\s*$").expect("valid code fence pattern"));

/// OpenAI client for interacting with the chat completions API
#[derive(Debug, Clone)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key, `None` when neither config nor environment provide one
    api_key: Option<String>,
    /// Environment variable named in the missing-key error
    api_key_env: String,
    /// API base URL
    endpoint: String,
    /// Chat model
    model: String,
    /// System prompt sent with every request
    system_prompt: String,
    /// Sampling temperature
    temperature: f32,
    /// Name of the source language used in the instruction
    source_language: String,
    /// Name of the target language used in the instruction
    target_language: String,
    /// Request timeout in seconds
    timeout_secs: u64,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,
    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,
    /// Temperature for generation
    temperature: f32,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub error: Option<OpenAIApiError>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
}

/// Error payload returned by the service
#[derive(Debug, Deserialize)]
pub struct OpenAIApiError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Numeric or textual, depending on the error
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl From<OpenAIApiError> for ProviderError {
    fn from(error: OpenAIApiError) -> Self {
        let code = match error.code {
            Some(serde_json::Value::String(code)) => code,
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        ProviderError::ServiceError {
            message: error.message,
            kind: error.kind,
            code,
        }
    }
}

impl Default for OpenAIRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            messages: Vec::new(),
            temperature: 0.2,
        }
    }
}

impl OpenAIRequest {
    /// Create a new request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Stable 64-bit fingerprint of a text
///
/// The first eight bytes of the SHA-256 digest, big-endian. Equal input always
/// gives the same value, across runs and platforms.
pub fn fingerprint(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Key every text of the batch by its decimal fingerprint
///
/// Fails if two different texts share a fingerprint, since their
/// translations could not be told apart.
pub fn tag_batch(batch: &Batch) -> Result<BTreeMap<String, String>, ProviderError> {
    let mut tagged: BTreeMap<String, String> = BTreeMap::new();
    for text in batch.iter() {
        let id = fingerprint(text);
        if let Some(existing) = tagged.insert(id.to_string(), text.to_string()) {
            return Err(ProviderError::FingerprintCollision {
                fingerprint: id,
                first: existing,
                second: text.to_string(),
            });
        }
    }
    Ok(tagged)
}

/// Build the user instruction embedding the tagged JSON
pub fn build_prompt(tagged_json: &str, source_language: &str, target_language: &str) -> String {
    format!(
        "Translate the following JSON from {} to {} while preserving the structure and only translating values (not keys). \
         Return only the translated JSON without any extra text.\n```json\n{}\n```",
        source_language, target_language, tagged_json
    )
}

/// Remove markdown code fences around a model reply
pub fn strip_code_fences(content: &str) -> String {
    CODE_FENCE.replace_all(content.trim(), "").trim().to_string()
}

/// Parse a model reply as a flat `fingerprint -> translation` object
///
/// Non-string values are ignored; anything that is not a JSON object fails.
pub fn parse_tagged_response(content: &str) -> Result<BTreeMap<String, String>, ProviderError> {
    let content = strip_code_fences(content);
    if content.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ProviderError::ParseError(format!("Failed to decode translated JSON: {}", e)))?;

    let object = match value {
        serde_json::Value::Object(object) => object,
        other => {
            return Err(ProviderError::ParseError(format!(
                "Expected a JSON object, got {}",
                other
            )));
        }
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(text) => Some((key, text)),
            _ => None,
        })
        .collect())
}

/// Map fingerprint-keyed translations back onto the batch texts
///
/// Texts whose fingerprint is missing or whose translation is empty are left
/// out of the result.
pub fn match_translations(batch: &Batch, parsed: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    batch
        .iter()
        .filter_map(|text| {
            parsed
                .get(&fingerprint(text).to_string())
                .filter(|translated| !translated.is_empty())
                .map(|translated| (text.to_string(), translated.clone()))
        })
        .collect()
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: "BOG_OPENAI_APIKEY".to_string(),
            endpoint: endpoint.into(),
            model: model.into(),
            system_prompt: "You are a professional translator specialized in accounting and finance.".to_string(),
            temperature: 0.2,
            source_language: "Georgian".to_string(),
            target_language: "English".to_string(),
            timeout_secs: 120,
        }
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> Self {
        let mut translation = config.translation.clone();
        translation.provider = ProviderKind::OpenAI;

        let mut provider = Self::new(translation.get_api_key(), translation.get_endpoint(), translation.get_model())
            .with_timeout(translation.get_timeout_secs());
        provider.api_key_env = translation.get_api_key_env();
        provider.system_prompt = translation.common.system_prompt.clone();
        provider.temperature = translation.common.temperature;
        provider.source_language = language_utils::get_language_name(&config.source_language)
            .unwrap_or_else(|_| config.source_language.clone());
        provider.target_language = language_utils::get_language_name(&config.target_language)
            .unwrap_or_else(|_| config.target_language.clone());
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

    /// Build the chat request for a tagged batch
    pub fn build_request(&self, tagged: &BTreeMap<String, String>) -> Result<OpenAIRequest, ProviderError> {
        let tagged_json = serde_json::to_string_pretty(tagged)
            .map_err(|e| ProviderError::ParseError(format!("Failed to encode batch: {}", e)))?;

        Ok(OpenAIRequest::new(&self.model)
            .add_message("system", &self.system_prompt)
            .add_message("user", build_prompt(&tagged_json, &self.source_language, &self.target_language))
            .temperature(self.temperature))
    }

    /// Send a chat request and return the first choice's content
    pub async fn complete(&self, api_key: &str, request: &OpenAIRequest) -> Result<String, ProviderError> {
        let api_url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&api_url)
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout_secs))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| send_error(e, self.timeout_secs))?;

        let parsed: OpenAIResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                error!("Failed to decode OpenAI response: {} ({})", e, body);
                return Err(ProviderError::ParseError(format!("Failed to decode OpenAI response: {}", e)));
            }
            Err(_) => {
                error!("OpenAI API error ({}): {}", status, body);
                return Err(ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: body,
                });
            }
        };

        if let Some(api_error) = parsed.error {
            error!("OpenAI API error ({}): {}", status, api_error.message);
            return Err(api_error.into());
        }

        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl TranslationProvider for OpenAI {
    fn name(&self) -> &str {
        ProviderKind::OpenAI.display_name()
    }

    async fn translate(&self, batch: &Batch) -> Result<BTreeMap<String, String>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| ProviderError::MissingApiKey {
            provider: self.name().to_string(),
            env_var: self.api_key_env.clone(),
        })?;

        if batch.is_empty() {
            return Ok(BTreeMap::new());
        }

        let tagged = tag_batch(batch)?;
        let request = self.build_request(&tagged)?;
        debug!("Sending {} tagged texts to {}", tagged.len(), self.model);

        let content = self.complete(api_key, &request).await?;
        let parsed = parse_tagged_response(&content)?;
        let translated = match_translations(batch, &parsed);

        if translated.len() < batch.len() {
            warn!(
                "Model returned {} of {} translations, the rest stays untranslated",
                translated.len(),
                batch.len()
            );
        }
        Ok(translated)
    }
}

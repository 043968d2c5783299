//! Application configuration module
//! This module handles the application configuration including loading,
//! validating and saving configuration settings.

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use url::Url;

use crate::language_utils;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the texts to translate (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language to translate into (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Dictionary persistence settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Google Cloud Translation (bulk text API)
    #[default]
    Google,
    // @provider: OpenAI chat completions
    OpenAI,
}

impl ProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google Translate",
            Self::OpenAI => "OpenAI",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::OpenAI => "openai".to_string(),
        }
    }
}

// Implement Display trait for ProviderKind
impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for ProviderKind
impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "openai" | "ai" => Ok(Self::OpenAI),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (chat providers only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key, takes precedence over the environment
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Environment variable holding the API key
    #[serde(default = "String::new")]
    pub api_key_env: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ProviderKind) -> Self {
        match provider_type {
            ProviderKind::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                api_key: String::new(),
                api_key_env: default_google_api_key_env(),
                endpoint: default_google_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            ProviderKind::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                api_key_env: default_openai_api_key_env(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_openai_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: ProviderKind,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt for chat providers
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    /// Lower values make output more deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of texts per bulk translation request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Overall deadline for one dispatch, in seconds (0 disables it)
    #[serde(default)]
    pub dispatch_timeout_secs: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            max_batch_size: default_max_batch_size(),
            dispatch_timeout_secs: 0,
        }
    }
}

/// Where and how the translation dictionary is persisted
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Dictionary file, defaults to `dictionary.json` in the storage directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Save the dictionary when the translator is closed
    #[serde(default = "default_true")]
    pub auto_save: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            file: None,
            auto_save: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "ka".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_openai_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_batch_size() -> usize {
    // Google Translate v2 accepts up to 128 texts per request
    128
}

fn default_true() -> bool {
    true
}

fn default_google_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_google_api_key_env() -> String {
    "BOG_GOOGLE_APIKEY".to_string()
}

fn default_openai_api_key_env() -> String {
    "BOG_OPENAI_APIKEY".to_string()
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator specialized in accounting and finance.".to_string()
}

impl Config {
    /// Load a configuration file, falling back to defaults when it is missing
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        crate::file_utils::FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    ///
    /// Missing API keys are not an error here: they only matter once there
    /// is something to translate.
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)?;
        language_utils::validate_language_code(&self.target_language)?;

        if language_utils::normalize_to_part1(&self.source_language)?
            == language_utils::normalize_to_part1(&self.target_language)?
        {
            return Err(anyhow!(
                "Source and target language must differ: {}",
                self.source_language
            ));
        }

        let common = &self.translation.common;
        if !(0.0..=2.0).contains(&common.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                common.temperature
            ));
        }
        if common.max_batch_size == 0 {
            return Err(anyhow!("max_batch_size must be greater than zero"));
        }

        let endpoint = self.translation.get_endpoint();
        Url::parse(&endpoint)
            .with_context(|| format!("Invalid endpoint for {}: {}", self.translation.provider, endpoint))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            dictionary: DictionaryConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &ProviderKind) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            ProviderKind::Google => String::new(),
            ProviderKind::OpenAI => default_openai_model(),
        }
    }

    /// Get the environment variable consulted for the active provider's key
    pub fn get_api_key_env(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key_env.is_empty() {
                return provider_config.api_key_env.clone();
            }
        }

        match self.provider {
            ProviderKind::Google => default_google_api_key_env(),
            ProviderKind::OpenAI => default_openai_api_key_env(),
        }
    }

    /// Get the API key for the active provider
    ///
    /// An explicit key wins over the environment variable; `None` when
    /// neither is set.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return Some(provider_config.api_key.clone());
            }
        }

        std::env::var(self.get_api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            ProviderKind::Google => default_google_endpoint(),
            ProviderKind::OpenAI => default_openai_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        match self.provider {
            ProviderKind::Google => default_timeout_secs(),
            ProviderKind::OpenAI => default_openai_timeout_secs(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            available_providers: vec![
                ProviderConfig::new(ProviderKind::Google),
                ProviderConfig::new(ProviderKind::OpenAI),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}

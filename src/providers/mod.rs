/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations behind one capability trait:
 * - Google: bulk text-translation API
 * - OpenAI: chat completions exchanging a fingerprint-keyed JSON envelope
 * - Mock: in-process provider for tests and dry runs
 */

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::app_config::{Config, ProviderKind};
use crate::errors::ProviderError;
use crate::translation::Batch;

/// Common trait for all translation providers
///
/// Implementations translate a batch of distinct source texts and return the
/// translations keyed by the original text. Texts the provider could not
/// translate are simply absent from the result.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Human readable provider name used in logs
    fn name(&self) -> &str;

    /// Translate every text of the batch
    ///
    /// # Arguments
    /// * `batch` - The distinct texts to translate
    ///
    /// # Returns
    /// * `Result<BTreeMap<String, String>, ProviderError>` - original -> translation
    async fn translate(&self, batch: &Batch) -> Result<BTreeMap<String, String>, ProviderError>;
}

/// Build the provider selected in the configuration
pub fn create_provider(config: &Config) -> Box<dyn TranslationProvider> {
    match config.translation.provider {
        ProviderKind::Google => Box::new(google::GoogleTranslate::from_config(config)),
        ProviderKind::OpenAI => Box::new(openai::OpenAI::from_config(config)),
    }
}

/// Map a reqwest send failure, keeping timeouts distinguishable
pub(crate) fn send_error(error: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::from(error)
    }
}

pub mod google;
pub mod mock;
pub mod openai;

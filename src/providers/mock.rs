/*!
 * Mock provider implementation for testing.
 *
 * This module provides a provider that simulates different behaviors without
 * any network access:
 * - `MockProvider::working()` - Translates every text
 * - `MockProvider::partial()` - Translates every other text, like a chat
 *   model dropping entries
 * - `MockProvider::intermittent(n)` - Fails every Nth request
 * - `MockProvider::failing()` - Always fails with an error
 *
 * Texts without a fixed translation become `EN-<fingerprint>`, which holds no
 * source-script characters, so a translated document extracts clean.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;
use crate::providers::openai::fingerprint;
use crate::translation::Batch;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a translation for every text
    Working,
    /// Succeeds but only translates texts at even positions of the batch
    Partial,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Fails as if no API key was configured
    MissingKey,
    /// Succeeds without translating anything
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Every batch received, in order
    received: Arc<Mutex<Vec<Vec<String>>>>,
    /// Fixed translations used instead of the generated ones
    known: HashMap<String, String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            known: HashMap::new(),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that drops every other text
    pub fn partial() -> Self {
        Self::new(MockBehavior::Partial)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that answers with nothing
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that waits before translating
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Use fixed translations for the given texts
    pub fn with_translations<I, K, V>(mut self, translations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.known
            .extend(translations.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Number of translate calls so far, including failed ones
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Batches received so far
    pub fn received_batches(&self) -> Vec<Vec<String>> {
        self.received.lock().clone()
    }

    /// Translation generated for a text without a fixed one
    pub fn default_translation(text: &str) -> String {
        format!("EN-{:016x}", fingerprint(text))
    }

    /// Translation produced for a text
    fn translation_for(&self, text: &str) -> String {
        self.known
            .get(text)
            .cloned()
            .unwrap_or_else(|| Self::default_translation(text))
    }

    fn translate_all<'a>(&self, texts: impl Iterator<Item = &'a str>) -> BTreeMap<String, String> {
        texts
            .map(|text| (text.to_string(), self.translation_for(text)))
            .collect()
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn translate(&self, batch: &Batch) -> Result<BTreeMap<String, String>, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .push(batch.iter().map(str::to_string).collect());

        match self.behavior {
            MockBehavior::Working => Ok(self.translate_all(batch.iter())),

            MockBehavior::Partial => Ok(self.translate_all(batch.iter().step_by(2))),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ConnectionError(format!(
                        "Simulated intermittent failure (request #{})",
                        count + 1
                    )))
                } else {
                    Ok(self.translate_all(batch.iter()))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::MissingKey => Err(ProviderError::MissingApiKey {
                provider: "Mock".to_string(),
                env_var: "BOG_MOCK_APIKEY".to_string(),
            }),

            MockBehavior::Empty => Ok(BTreeMap::new()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.translate_all(batch.iter()))
            }
        }
    }
}

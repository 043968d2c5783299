use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{DocumentFormat, FileManager};
use crate::providers::{self, TranslationProvider};
use crate::statement::AccountStatements;
use crate::translation::{Localize, ReplacedReport, Translator};

// @module: Application controller for document localization

/// Main application controller for statement translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Write newly learned translations back to the dictionary file
    save_dictionary: bool,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let save_dictionary = config.dictionary.auto_save;

        Ok(Self {
            config,
            save_dictionary,
        })
    }

    /// Keep learned translations in memory only
    pub fn without_dictionary_save(mut self) -> Self {
        self.save_dictionary = false;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate a document file with the configured provider
    pub async fn translate_file(
        &self,
        input_file: &Path,
        output_file: &Path,
        format: Option<DocumentFormat>,
    ) -> Result<ReplacedReport> {
        let provider = providers::create_provider(&self.config);
        self.translate_file_with(provider.as_ref(), input_file, output_file, format)
            .await
    }

    /// Translate a document file with the given provider
    pub async fn translate_file_with(
        &self,
        provider: &dyn TranslationProvider,
        input_file: &Path,
        output_file: &Path,
        format: Option<DocumentFormat>,
    ) -> Result<ReplacedReport> {
        let start_time = Instant::now();

        let format = match format {
            Some(format) => format,
            None => FileManager::detect_document_format(input_file)?,
        };
        info!("Localizing {:?} as {:?} with {}", input_file, format, provider.name());

        let report = match format {
            DocumentFormat::Statements => {
                self.translate_json_file::<AccountStatements>(provider, input_file, output_file)
                    .await?
            }
            DocumentFormat::Json => {
                self.translate_json_file::<serde_json::Value>(provider, input_file, output_file)
                    .await?
            }
        };

        info!(
            "Replaced {} texts in {}",
            report.len(),
            Self::format_duration(start_time.elapsed())
        );
        Ok(report)
    }

    async fn translate_json_file<D>(
        &self,
        provider: &dyn TranslationProvider,
        input_file: &Path,
        output_file: &Path,
    ) -> Result<ReplacedReport>
    where
        D: Localize + Serialize + DeserializeOwned,
    {
        let mut document: D = FileManager::read_json(input_file)?;
        let report = self.translate_document(provider, &mut document).await?;
        FileManager::write_json(output_file, &document)?;
        Ok(report)
    }

    /// Localize a document in place
    ///
    /// Newly learned translations are persisted right after the provider call,
    /// so a later failure does not lose them. A failed save only logs a warning.
    pub async fn translate_document<D: Localize + ?Sized>(
        &self,
        provider: &dyn TranslationProvider,
        document: &mut D,
    ) -> Result<ReplacedReport> {
        let mut translator = self.translator()?;

        let batch = translator.extract(document)?;
        let merged = translator.dispatch(provider, &batch).await?;

        if merged > 0 && self.save_dictionary {
            if let Err(e) = translator.save_dictionary() {
                warn!("Failed to save dictionary: {}", e);
            }
        }

        let report = translator.apply(document)?;
        translator.close()?;
        Ok(report)
    }

    /// List the texts of a document file that have no translation yet
    pub fn extract_file(&self, input_file: &Path, format: Option<DocumentFormat>) -> Result<Vec<String>> {
        let format = match format {
            Some(format) => format,
            None => FileManager::detect_document_format(input_file)?,
        };

        let mut translator = self.translator()?;
        let batch = match format {
            DocumentFormat::Statements => {
                let mut document: AccountStatements = FileManager::read_json(input_file)?;
                translator.extract(&mut document)?
            }
            DocumentFormat::Json => {
                let mut document: serde_json::Value = FileManager::read_json(input_file)?;
                translator.extract(&mut document)?
            }
        };

        Ok(batch.into_iter().collect())
    }

    // @creates: Translator with the configured dictionary and timeout
    fn translator(&self) -> Result<Translator> {
        let mut translator = Translator::new();

        let timeout_secs = self.config.translation.common.dispatch_timeout_secs;
        if timeout_secs > 0 {
            translator = translator.with_timeout(Duration::from_secs(timeout_secs));
        }

        if let Some(path) = &self.config.dictionary.file {
            translator
                .load_dictionary(path, false)
                .with_context(|| format!("Failed to load dictionary: {:?}", path))?;
        }

        Ok(translator)
    }

    /// Format a duration in a human-readable way
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

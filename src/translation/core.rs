/*!
 * Translation orchestrator.
 *
 * The `Translator` owns the dictionary and drives one document through
 * extract -> dispatch -> apply. Translations merged by `dispatch` stay in the
 * dictionary for every later document, so a text is only ever sent to a
 * provider once per dictionary.
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use crate::errors::{DictionaryError, ProviderError, TranslationError};
use crate::providers::TranslationProvider;
use crate::translation::batch::Batch;
use crate::translation::dictionary::Dictionary;
use crate::translation::walker::{Localize, WalkMode, walk};

/// Original -> translation for every string rewritten by one `apply`
pub type ReplacedReport = BTreeMap<String, String>;

/// Last step the translator completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorState {
    Idle,
    Extracted,
    Dispatched,
    Applied,
}

/// Drives documents through extraction, provider dispatch and rewriting
#[derive(Debug)]
pub struct Translator {
    /// Known translations
    dictionary: Dictionary,
    /// File the dictionary was loaded from
    dictionary_path: Option<PathBuf>,
    /// Save to `dictionary_path` when closed or dropped
    auto_save: bool,
    /// Upper bound for one provider call
    timeout: Option<Duration>,
    /// Progress marker
    state: TranslatorState,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Create a translator with an empty in-memory dictionary
    pub fn new() -> Self {
        Self::with_dictionary(Dictionary::new())
    }

    /// Create a translator around an existing dictionary
    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            dictionary_path: None,
            auto_save: false,
            timeout: None,
            state: TranslatorState::Idle,
        }
    }

    /// Bound every provider call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Known translations
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Last completed step
    pub fn state(&self) -> TranslatorState {
        self.state
    }

    /// Collect the source-script strings of `document` that have no translation yet
    ///
    /// The document is not modified. Calling this twice without a dispatch in
    /// between returns the same batch.
    pub fn extract<D: Localize + ?Sized>(&mut self, document: &mut D) -> Result<Batch, TranslationError> {
        let pending = walk(document, WalkMode::Extract, &self.dictionary)?;
        let batch = Batch::from(pending);
        debug!("Extracted {} untranslated texts", batch.len());
        self.state = TranslatorState::Extracted;
        Ok(batch)
    }

    /// Send the still-unknown texts of `batch` to `provider` and merge the answers
    ///
    /// Returns the number of translations merged into the dictionary. An empty
    /// remainder returns `Ok(0)` without contacting the provider. A failed or
    /// timed out call leaves the dictionary untouched.
    pub async fn dispatch(
        &mut self,
        provider: &dyn TranslationProvider,
        batch: &Batch,
    ) -> Result<usize, TranslationError> {
        let mut pending = batch.clone();
        pending.retain(|text| !self.dictionary.contains(text));

        if pending.is_empty() {
            debug!("Nothing to translate, skipping {}", provider.name());
            self.state = TranslatorState::Dispatched;
            return Ok(0);
        }

        info!("Translating {} texts with {}", pending.len(), provider.name());

        let translated = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, provider.translate(&pending))
                .await
                .map_err(|_| ProviderError::Timeout(limit.as_secs()))??,
            None => provider.translate(&pending).await?,
        };

        let merged = self.dictionary.extend(
            translated
                .into_iter()
                .filter(|(original, _)| pending.contains(original)),
        );

        if merged < pending.len() {
            warn!(
                "{} returned {} of {} translations, the rest stay untranslated",
                provider.name(),
                merged,
                pending.len()
            );
        }

        self.state = TranslatorState::Dispatched;
        Ok(merged)
    }

    /// Rewrite every source-script string of `document` that has a translation
    ///
    /// Strings without a translation are left as they are. The report holds one
    /// entry per distinct rewritten string.
    pub fn apply<D: Localize + ?Sized>(&mut self, document: &mut D) -> Result<ReplacedReport, TranslationError> {
        let replaced = walk(document, WalkMode::Apply, &self.dictionary)?;
        debug!("Replaced {} distinct texts", replaced.len());
        self.state = TranslatorState::Applied;
        Ok(replaced)
    }

    /// Extract, dispatch and apply in one call
    pub async fn localize<D: Localize + ?Sized>(
        &mut self,
        provider: &dyn TranslationProvider,
        document: &mut D,
    ) -> Result<ReplacedReport, TranslationError> {
        let batch = self.extract(document)?;
        self.dispatch(provider, &batch).await?;
        self.apply(document)
    }

    /// Merge the dictionary stored at `path` into this one
    ///
    /// Loaded entries never overwrite translations already known. With
    /// `auto_save` the dictionary is written back to `path` on close.
    pub fn load_dictionary<P: AsRef<Path>>(&mut self, path: P, auto_save: bool) -> Result<usize, TranslationError> {
        let path = path.as_ref();
        let loaded = Dictionary::load(path)?;

        let mut added = 0;
        for (original, translated) in loaded.iter() {
            if !self.dictionary.contains(original) && self.dictionary.put(original, translated) {
                added += 1;
            }
        }

        info!("Loaded {} translations from {}", added, path.display());
        self.dictionary_path = Some(path.to_path_buf());
        self.auto_save = auto_save;
        Ok(added)
    }

    /// Write the dictionary to `path`
    pub fn persist_dictionary<P: AsRef<Path>>(&self, path: P) -> Result<(), TranslationError> {
        self.dictionary.save(path)?;
        Ok(())
    }

    /// Write the dictionary back to the file it was loaded from
    ///
    /// Does nothing when no dictionary file was loaded.
    pub fn save_dictionary(&self) -> Result<(), TranslationError> {
        match &self.dictionary_path {
            Some(path) => self.persist_dictionary(path),
            None => Ok(()),
        }
    }

    /// Finish with the translator, saving the dictionary if auto-save is on
    pub fn close(mut self) -> Result<(), TranslationError> {
        let auto_save = std::mem::replace(&mut self.auto_save, false);
        if auto_save {
            self.save_dictionary()?;
        }
        Ok(())
    }

    fn save_on_drop(&self) -> Result<(), DictionaryError> {
        if let Some(path) = &self.dictionary_path {
            self.dictionary.save(path)?;
        }
        Ok(())
    }
}

impl Drop for Translator {
    fn drop(&mut self) {
        if self.auto_save {
            if let Err(e) = self.save_on_drop() {
                warn!("Failed to save dictionary on shutdown: {}", e);
            }
        }
    }
}

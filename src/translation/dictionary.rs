/*!
 * Persistent translation dictionary.
 *
 * The dictionary maps an original-language string to its previously obtained
 * translation. It is loaded once, grows with every successful dispatch and is
 * written back as a flat JSON object so later runs never pay for the same
 * translation twice.
 */

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::DictionaryError;

/// In-memory source -> translation map with JSON persistence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    /// Known translations, never holding empty values
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from a JSON file
    ///
    /// A missing file yields an empty dictionary. Empty values in the file are
    /// dropped, they never count as known translations.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Dictionary {:?} not found, starting empty", path);
            return Ok(Self::new());
        }

        let data = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: HashMap<String, String> =
            serde_json::from_str(&data).map_err(|source| DictionaryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut dictionary = Self::new();
        dictionary.extend(raw);
        debug!("Loaded {} dictionary entries from {:?}", dictionary.len(), path);
        Ok(dictionary)
    }

    /// Write the dictionary as pretty JSON, keys sorted
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let path = path.as_ref();
        let sorted: BTreeMap<&str, &str> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let json = serde_json::to_string_pretty(&sorted)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DictionaryError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, json).map_err(|source| DictionaryError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Saved {} dictionary entries to {:?}", self.len(), path);
        Ok(())
    }

    /// Known translation for a text, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Whether a non-empty translation is known for a text
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store a translation, returning whether it was stored
    ///
    /// Empty translations are ignored so they never mask a missing entry.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.entries.insert(key.into(), value);
        true
    }

    /// Store every non-empty pair, returning how many were stored
    pub fn extend<I, K, V>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| self.put(k, v))
            .filter(|stored| *stored)
            .count()
    }

    /// Number of known translations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no translation is known
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over known translations in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        dictionary.extend(iter);
        dictionary
    }
}

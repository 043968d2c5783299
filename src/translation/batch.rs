/*!
 * Translation batches.
 *
 * A batch is the set of distinct source strings that still need a translation
 * in one dispatch cycle. It is ordered so requests and logs are reproducible.
 */

use std::collections::{BTreeMap, BTreeSet};

/// Distinct source strings awaiting translation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    texts: BTreeSet<String>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text, returning false if it was already present
    pub fn insert(&mut self, text: impl Into<String>) -> bool {
        self.texts.insert(text.into())
    }

    /// Whether the batch holds a text
    pub fn contains(&self, text: &str) -> bool {
        self.texts.contains(text)
    }

    /// Number of distinct texts
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether there is nothing to translate
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Iterate over texts in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }

    /// Keep only the texts matching a predicate
    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.texts.retain(keep);
    }

    /// Split into ordered groups of at most `size` texts
    pub fn chunks(&self, size: usize) -> Vec<Vec<String>> {
        let size = size.max(1);
        let texts: Vec<String> = self.texts.iter().cloned().collect();
        texts.chunks(size).map(<[String]>::to_vec).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Batch {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            texts: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// Extract-mode walks yield `text -> ""` placeholders.
impl From<BTreeMap<String, String>> for Batch {
    fn from(collected: BTreeMap<String, String>) -> Self {
        collected.into_keys().collect()
    }
}

impl IntoIterator for Batch {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.texts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.texts.iter()
    }
}

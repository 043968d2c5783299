/*!
 * Generic document traversal.
 *
 * Any value implementing [`Localize`] can be walked: strings are the leaves
 * that may be translated, containers forward the walker to their children and
 * other scalars are ignored. Records opt in through [`localize_fields!`],
 * which visits the listed fields in declaration order.
 *
 * The same traversal runs in two modes:
 * - [`WalkMode::Extract`] collects source-script strings the dictionary does
 *   not know yet, each mapped to an empty placeholder.
 * - [`WalkMode::Apply`] rewrites source-script strings with their known
 *   translation and records `original -> translation`.
 */

use std::collections::{BTreeMap, HashMap};

use crate::errors::TraversalError;
use crate::language_utils::is_source_script;
use crate::translation::dictionary::Dictionary;

/// Deepest nesting a walker accepts by default
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What a walk does with the source-script strings it meets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Collect strings lacking a known translation
    Extract,
    /// Replace strings with their known translation
    Apply,
}

/// Traversal state shared by every node of one walk
#[derive(Debug)]
pub struct Walker<'d> {
    mode: WalkMode,
    dictionary: &'d Dictionary,
    collected: BTreeMap<String, String>,
    depth: usize,
    max_depth: usize,
}

impl<'d> Walker<'d> {
    /// Create a walker reading translations from `dictionary`
    pub fn new(mode: WalkMode, dictionary: &'d Dictionary) -> Self {
        Self {
            mode,
            dictionary,
            collected: BTreeMap::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Visit a composite child one level deeper
    pub fn descend<T: Localize + ?Sized>(&mut self, node: &mut T) -> Result<(), TraversalError> {
        if self.depth >= self.max_depth {
            return Err(TraversalError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = node.localize(self);
        self.depth -= 1;
        result
    }

    /// Visit a leaf string
    pub fn visit_text(&mut self, text: &mut String) {
        if !is_source_script(text) {
            return;
        }

        let dictionary = self.dictionary;
        match self.mode {
            WalkMode::Extract => {
                if !dictionary.contains(text) && !self.collected.contains_key(text.as_str()) {
                    self.collected.insert(text.clone(), String::new());
                }
            }
            WalkMode::Apply => {
                if let Some(translated) = dictionary.get(text) {
                    if translated != text.as_str() {
                        let original = std::mem::replace(text, translated.to_string());
                        self.collected.insert(original, translated.to_string());
                    }
                }
            }
        }
    }

    /// Finish the walk and take what was gathered
    pub fn into_collected(self) -> BTreeMap<String, String> {
        self.collected
    }
}

/// A document node the walker can traverse
pub trait Localize {
    /// Walk this node and its children
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError>;
}

/// Walk a whole document in the given mode
///
/// In extract mode the result maps every untranslated string to `""`; in
/// apply mode it maps every rewritten string to its translation. The document
/// is only modified in apply mode. A failed apply walk may have rewritten a
/// prefix of the document.
pub fn walk<D: Localize + ?Sized>(
    document: &mut D,
    mode: WalkMode,
    dictionary: &Dictionary,
) -> Result<BTreeMap<String, String>, TraversalError> {
    let mut walker = Walker::new(mode, dictionary);
    document.localize(&mut walker)?;
    Ok(walker.into_collected())
}

/// Implement [`Localize`] for a record by visiting the listed fields in order
#[macro_export]
macro_rules! localize_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::translation::walker::Localize for $ty {
            fn localize(
                &mut self,
                walker: &mut $crate::translation::walker::Walker<'_>,
            ) -> ::std::result::Result<(), $crate::errors::TraversalError> {
                $( walker.descend(&mut self.$field)?; )*
                Ok(())
            }
        }
    };
}

/// Implement [`Localize`] as a no-op for scalar leaves
#[macro_export]
macro_rules! localize_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::translation::walker::Localize for $ty {
                fn localize(
                    &mut self,
                    _walker: &mut $crate::translation::walker::Walker<'_>,
                ) -> ::std::result::Result<(), $crate::errors::TraversalError> {
                    Ok(())
                }
            }
        )*
    };
}

localize_leaf!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    chrono::NaiveDate, chrono::NaiveDateTime, chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
);

impl Localize for String {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        walker.visit_text(self);
        Ok(())
    }
}

impl<T: Localize> Localize for Option<T> {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        match self {
            Some(inner) => inner.localize(walker),
            None => Ok(()),
        }
    }
}

impl<T: Localize + ?Sized> Localize for Box<T> {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        (**self).localize(walker)
    }
}

impl<T: Localize> Localize for [T] {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        for item in self.iter_mut() {
            walker.descend(item)?;
        }
        Ok(())
    }
}

impl<T: Localize> Localize for Vec<T> {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        self.as_mut_slice().localize(walker)
    }
}

// Keys are identifiers, only values are candidates.
impl<K, V: Localize, S> Localize for HashMap<K, V, S> {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        for value in self.values_mut() {
            walker.descend(value)?;
        }
        Ok(())
    }
}

impl<K, V: Localize> Localize for BTreeMap<K, V> {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        for value in self.values_mut() {
            walker.descend(value)?;
        }
        Ok(())
    }
}

impl Localize for serde_json::Value {
    fn localize(&mut self, walker: &mut Walker<'_>) -> Result<(), TraversalError> {
        use serde_json::Value;

        match self {
            Value::String(text) => walker.visit_text(text),
            Value::Array(items) => {
                for item in items.iter_mut() {
                    walker.descend(item)?;
                }
            }
            Value::Object(fields) => {
                for (_, value) in fields.iter_mut() {
                    walker.descend(value)?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
        Ok(())
    }
}

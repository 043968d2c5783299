/*!
 * Document localization engine.
 *
 * This module contains the provider-independent part of translation. It is
 * split into several submodules:
 *
 * - `core`: The `Translator` orchestrating extract, dispatch and apply
 * - `batch`: Sets of texts awaiting translation
 * - `dictionary`: Persistent original -> translation store
 * - `walker`: Generic traversal of documents implementing `Localize`
 */

// Re-export main types for easier usage
pub use self::batch::Batch;
pub use self::core::{ReplacedReport, Translator, TranslatorState};
pub use self::dictionary::Dictionary;
pub use self::walker::{Localize, WalkMode, Walker, walk};

// Submodules
pub mod batch;
pub mod core;
pub mod dictionary;
pub mod walker;

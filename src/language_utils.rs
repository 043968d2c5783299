//! Language and script utilities
//!
//! This module provides the source-script predicate used to decide which
//! document strings need translation, plus ISO 639 helpers used to validate
//! the configured language pair.

use anyhow::{Result, anyhow};
use isolang::Language;

/// First code point of the Georgian Unicode block
const GEORGIAN_FIRST: char = '\u{10A0}';

/// Last code point of the Georgian Unicode block
const GEORGIAN_LAST: char = '\u{10FF}';

/// Check whether a text contains at least one Georgian character
///
/// Mixed text such as `"სს 12345"` matches; empty and purely Latin or numeric
/// text does not.
pub fn is_source_script(text: &str) -> bool {
    text.chars().any(|c| (GEORGIAN_FIRST..=GEORGIAN_LAST).contains(&c))
}

/// Map an ISO 639-2/B code to its ISO 639-2/T twin, if it has one
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(part2t)
}

/// Resolve a 2- or 3-letter language code
fn resolve_language(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = part2b_to_part2t(&normalized).unwrap_or(&normalized);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate that a code is a known ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<()> {
    resolve_language(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 when one exists
///
/// Provider APIs expect the short form ("ka", "en"); languages without a
/// 2-letter code keep their ISO 639-2/T code.
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let lang = resolve_language(code)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = resolve_language(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/*!
 * Tests for generic document traversal
 */

use std::collections::BTreeMap;

use bogclient::errors::TraversalError;
use bogclient::translation::{Dictionary, Localize, WalkMode, Walker, walk};
use serde_json::json;

#[derive(Debug, Default, Clone, PartialEq)]
struct Invoice {
    title: String,
    number: u32,
    lines: Vec<InvoiceLine>,
    notes: BTreeMap<String, String>,
    memo: Option<Box<String>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct InvoiceLine {
    description: String,
    amount: f64,
}

bogclient::localize_fields!(Invoice { title, number, lines, notes, memo });
bogclient::localize_fields!(InvoiceLine { description, amount });

fn invoice() -> Invoice {
    Invoice {
        title: "ანგარიში".to_string(),
        number: 7,
        lines: vec![
            InvoiceLine {
                description: "საქართველო".to_string(),
                amount: 10.0,
            },
            InvoiceLine {
                description: "საქართველო".to_string(),
                amount: 20.0,
            },
            InvoiceLine {
                description: "Consulting".to_string(),
                amount: 30.0,
            },
        ],
        notes: BTreeMap::from([("ანგარიში".to_string(), "გადახდილია".to_string())]),
        memo: Some(Box::new("შენიშვნა".to_string())),
    }
}

#[test]
fn test_extract_shouldDedupeAndIgnoreMapKeys() {
    let mut document = invoice();

    let collected = walk(&mut document, WalkMode::Extract, &Dictionary::new()).unwrap();

    let keys: Vec<&str> = collected.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["ანგარიში", "გადახდილია", "საქართველო", "შენიშვნა"]);
    assert_eq!(document, invoice(), "extract must not modify the document");
}

#[test]
fn test_extract_withEmptyDictionaryValue_shouldStillCollect() {
    let mut dictionary = Dictionary::new();
    dictionary.put("ანგარიში", "");
    let mut document = invoice();

    let collected = walk(&mut document, WalkMode::Extract, &dictionary).unwrap();

    assert!(collected.contains_key("ანგარიში"));
}

#[test]
fn test_apply_withSharedLeaf_shouldReplaceBothAndReportOnce() {
    let dictionary: Dictionary = [("საქართველო", "Georgia")].into_iter().collect();
    let mut document = invoice();

    let replaced = walk(&mut document, WalkMode::Apply, &dictionary).unwrap();

    assert_eq!(document.lines[0].description, "Georgia");
    assert_eq!(document.lines[1].description, "Georgia");
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced["საქართველო"], "Georgia");
}

#[test]
fn test_apply_withPartialDictionary_shouldLeaveUnknownTexts() {
    let dictionary: Dictionary = [("შენიშვნა", "Note"), ("გადახდილია", "Paid")].into_iter().collect();
    let mut document = invoice();

    walk(&mut document, WalkMode::Apply, &dictionary).unwrap();

    assert_eq!(document.title, "ანგარიში");
    assert_eq!(document.memo.as_deref().map(String::as_str), Some("Note"));
    assert_eq!(document.notes["ანგარიში"], "Paid");
    assert_eq!(document.lines[2].description, "Consulting");
}

#[test]
fn test_applyThenExtract_shouldLeaveNothingPending() {
    let dictionary: Dictionary = [
        ("ანგარიში", "Invoice"),
        ("საქართველო", "Georgia"),
        ("გადახდილია", "Paid"),
        ("შენიშვნა", "Note"),
    ]
    .into_iter()
    .collect();
    let mut document = invoice();

    walk(&mut document, WalkMode::Apply, &dictionary).unwrap();
    let pending = walk(&mut document, WalkMode::Extract, &Dictionary::new()).unwrap();

    assert!(pending.is_empty());
}

#[test]
fn test_walk_jsonDocument_shouldTraverseArraysAndObjects() {
    let mut document = json!({
        "rows": [{"text": "ბანკი"}, {"text": "ბანკი"}, {"text": 5}],
        "empty": null
    });

    let collected = walk(&mut document, WalkMode::Extract, &Dictionary::new()).unwrap();

    assert_eq!(collected.len(), 1);
    assert!(collected.contains_key("ბანკი"));
}

#[test]
fn test_walker_withTightDepthLimit_shouldReportDepthExceeded() {
    let dictionary = Dictionary::new();
    let mut document = invoice();

    let mut walker = Walker::new(WalkMode::Extract, &dictionary).with_max_depth(1);
    let result = document.localize(&mut walker);

    assert_eq!(result, Err(TraversalError::DepthExceeded { limit: 1 }));
}

/*!
 * Integration tests for extract, dispatch and apply cycles
 */

use std::collections::BTreeMap;
use std::time::Duration;

use bogclient::errors::{ErrorCategory, ProviderError, TranslationError};
use bogclient::providers::mock::MockProvider;
use bogclient::providers::openai::{fingerprint, match_translations};
use bogclient::statement::AccountStatements;
use bogclient::translation::{Batch, Dictionary, Translator, TranslatorState};
use serde_json::json;
use crate::common;

fn load_sample() -> AccountStatements {
    let content = std::fs::read_to_string(common::test_resource_path("statement_sample.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_extract_calledTwiceWithoutDispatch_shouldBeIdempotent() {
    let mut translator = Translator::new();
    let mut statements = load_sample();

    let first = translator.extract(&mut statements).unwrap();
    let second = translator.extract(&mut statements).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[tokio::test]
async fn test_dispatch_thenExtract_shouldConvergeToEmptyBatch() {
    common::init_logging();
    let provider = MockProvider::working().with_translations(common::statement_translations());
    let mut translator = Translator::new();
    let mut statements = load_sample();

    let batch = translator.extract(&mut statements).unwrap();
    let merged = translator.dispatch(&provider, &batch).await.unwrap();
    let remaining = translator.extract(&mut statements).unwrap();

    assert_eq!(merged, 4);
    assert!(remaining.is_empty());
    assert_eq!(translator.state(), TranslatorState::Extracted);
}

#[tokio::test]
async fn test_dispatch_withEmptyRemainder_shouldNotCallProvider() {
    let provider = MockProvider::working();
    let mut translator = Translator::with_dictionary(common::statement_translations().into_iter().collect());
    let mut statements = load_sample();

    let batch = translator.extract(&mut statements).unwrap();
    let merged = translator.dispatch(&provider, &batch).await.unwrap();

    assert!(batch.is_empty());
    assert_eq!(merged, 0);
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_dispatch_shouldOnlySendUnknownTexts() {
    let provider = MockProvider::working();
    let mut translator = Translator::with_dictionary([("ბანკი", "Bank")].into_iter().collect());
    let batch: Batch = ["ბანკი", "თანხა"].into_iter().collect();

    translator.dispatch(&provider, &batch).await.unwrap();

    assert_eq!(provider.received_batches(), vec![vec!["თანხა".to_string()]]);
}

#[tokio::test]
async fn test_localize_withSharedLeaf_shouldReportSingleEntry() {
    let provider = MockProvider::working().with_translations([("საქართველო", "Georgia")]);
    let mut translator = Translator::new();
    let mut document = json!({"from": "საქართველო", "to": ["საქართველო"], "code": "GE"});

    let report = translator.localize(&provider, &mut document).await.unwrap();

    assert_eq!(document, json!({"from": "Georgia", "to": ["Georgia"], "code": "GE"}));
    assert_eq!(report, BTreeMap::from([("საქართველო".to_string(), "Georgia".to_string())]));
}

#[tokio::test]
async fn test_dispatch_withPartialProvider_shouldMergeWhatWasReturned() {
    let provider = MockProvider::partial();
    let mut translator = Translator::new();
    let mut statements = load_sample();

    let batch = translator.extract(&mut statements).unwrap();
    let merged = translator.dispatch(&provider, &batch).await.unwrap();
    let report = translator.apply(&mut statements).unwrap();
    let remaining = translator.extract(&mut statements).unwrap();

    assert_eq!(merged, 2);
    assert_eq!(report.len(), 2);
    assert_eq!(remaining.len(), 2);
}

#[tokio::test]
async fn test_apply_withGeneratedTranslations_shouldLeaveOnlyUntranslatedTexts() {
    let provider = MockProvider::partial();
    let mut translator = Translator::new();
    let mut statements = load_sample();

    let batch = translator.extract(&mut statements).unwrap();
    translator.dispatch(&provider, &batch).await.unwrap();
    translator.apply(&mut statements).unwrap();
    let remaining = translator.extract(&mut statements).unwrap();

    let untranslated: Vec<&str> = batch.iter().skip(1).step_by(2).collect();
    assert_eq!(remaining.iter().collect::<Vec<_>>(), untranslated);
    assert!(remaining.iter().all(|text| !translator.dictionary().contains(text)));

    let mut document = json!({"title": "ანგარიში", "rows": ["ხელფასი", "ანგარიში"]});
    translator.localize(&MockProvider::working(), &mut document).await.unwrap();
    assert!(translator.extract(&mut document).unwrap().is_empty());
    assert_eq!(document["title"], MockProvider::default_translation("ანგარიში"));
}

#[tokio::test]
async fn test_dispatch_afterFailure_shouldSucceedOnRetry() {
    let provider = MockProvider::intermittent(1);
    let fallback = MockProvider::working();
    let mut translator = Translator::new();
    let mut statements = load_sample();

    let batch = translator.extract(&mut statements).unwrap();
    let error = translator.dispatch(&provider, &batch).await.unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Transport);
    assert!(translator.dictionary().is_empty());

    let batch = translator.extract(&mut statements).unwrap();
    let merged = translator.dispatch(&fallback, &batch).await.unwrap();
    assert_eq!(merged, 4);
}

#[tokio::test]
async fn test_dispatch_repeated_shouldAccumulate() {
    let mut translator = Translator::new();
    let first: Batch = ["ბანკი"].into_iter().collect();
    let second: Batch = ["თანხა"].into_iter().collect();

    translator.dispatch(&MockProvider::working(), &first).await.unwrap();
    translator.dispatch(&MockProvider::working(), &second).await.unwrap();

    assert_eq!(translator.dictionary().len(), 2);
}

#[tokio::test]
async fn test_dispatch_withTimeout_shouldReturnTimeoutAndMergeNothing() {
    let mut translator = Translator::new().with_timeout(Duration::from_millis(10));
    let batch: Batch = ["ბანკი"].into_iter().collect();

    let result = translator.dispatch(&MockProvider::slow(1_000), &batch).await;

    assert!(matches!(result, Err(TranslationError::Provider(ProviderError::Timeout(_)))));
    assert!(translator.dictionary().is_empty());
}

#[test]
fn test_apply_beforeDispatch_shouldUseExistingDictionary() {
    let mut translator = Translator::with_dictionary([("ხელფასი", "Salary")].into_iter().collect());
    let mut statements = load_sample();

    let report = translator.apply(&mut statements).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(statements.combined[0].records[0].entry_comment, "Salary");
    assert_eq!(statements.combined[0].records[0].sender_details.name, "შპს საქართველო");
}

#[test]
fn test_fingerprintMatching_withOneDroppedEntry_shouldMergeOnlyMatched() {
    let batch: Batch = ["ბანკი", "თანხა"].into_iter().collect();
    let reply = BTreeMap::from([(fingerprint("ბანკი").to_string(), "Bank".to_string())]);

    let matched = match_translations(&batch, &reply);
    let mut dictionary = Dictionary::new();
    dictionary.extend(matched);

    assert_eq!(dictionary.get("ბანკი"), Some("Bank"));
    assert!(!dictionary.contains("თანხა"));
}

#[test]
fn test_dictionaryLifecycle_shouldPersistAcrossTranslators() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("dictionary.json");

    let mut translator = Translator::with_dictionary([("ბანკი", "Bank")].into_iter().collect());
    translator.load_dictionary(&path, true).unwrap();
    translator.close().unwrap();

    let mut reopened = Translator::new();
    let added = reopened.load_dictionary(&path, false).unwrap();
    assert_eq!(added, 1);
    assert_eq!(reopened.dictionary().get("ბანკი"), Some("Bank"));
}

#[test]
fn test_persistDictionary_shouldWriteToGivenPath() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("copy.json");
    let translator = Translator::with_dictionary([("ბანკი", "Bank")].into_iter().collect());

    translator.persist_dictionary(&path).unwrap();

    assert_eq!(Dictionary::load(&path).unwrap().len(), 1);
}

#[test]
fn test_drop_withoutAutoSave_shouldNotWrite() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("dictionary.json");

    {
        let mut translator = Translator::with_dictionary([("ბანკი", "Bank")].into_iter().collect());
        translator.load_dictionary(&path, false).unwrap();
    }

    assert!(!path.exists());
}

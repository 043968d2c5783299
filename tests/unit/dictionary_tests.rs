/*!
 * Tests for dictionary persistence
 */

use bogclient::errors::DictionaryError;
use bogclient::translation::Dictionary;
use crate::common;

#[test]
fn test_load_withMissingFile_shouldReturnEmptyDictionary() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dictionary = Dictionary::load(temp_dir.path().join("missing.json")).unwrap();
    assert!(dictionary.is_empty());
}

#[test]
fn test_load_withMalformedFile_shouldReturnParseError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "dictionary.json", "{ not json").unwrap();

    let result = Dictionary::load(&path);

    assert!(matches!(result, Err(DictionaryError::Parse { .. })));
}

#[test]
fn test_load_withNonStringValues_shouldReturnParseError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "dictionary.json", r#"{"ბანკი": 1}"#).unwrap();

    assert!(matches!(Dictionary::load(&path), Err(DictionaryError::Parse { .. })));
}

#[test]
fn test_load_withEmptyValues_shouldDropThem() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "dictionary.json",
        r#"{"ბანკი": "Bank", "თანხა": ""}"#,
    )
    .unwrap();

    let dictionary = Dictionary::load(&path).unwrap();

    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary.get("ბანკი"), Some("Bank"));
    assert!(!dictionary.contains("თანხა"));
}

#[test]
fn test_load_withDirectoryPath_shouldReturnReadError() {
    let temp_dir = common::create_temp_dir().unwrap();

    let result = Dictionary::load(temp_dir.path());

    assert!(matches!(result, Err(DictionaryError::Read { .. })));
}

#[test]
fn test_saveThenLoad_shouldRestoreEveryEntry() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("store").join("dictionary.json");
    let dictionary: Dictionary = [("საქართველო", "Georgia"), ("ბანკი", "Bank")].into_iter().collect();

    dictionary.save(&path).unwrap();
    let loaded = Dictionary::load(&path).unwrap();

    assert_eq!(loaded, dictionary);
}

#[test]
fn test_save_shouldWriteSortedFlatObject() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("dictionary.json");
    let dictionary: Dictionary = [("ბ", "b"), ("ა", "a")].into_iter().collect();

    dictionary.save(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    assert_eq!(content, "{\n  \"ა\": \"a\",\n  \"ბ\": \"b\"\n}");
}

#[test]
fn test_save_intoFilePath_shouldReturnWriteError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let blocker = common::create_test_file(temp_dir.path(), "blocker", "").unwrap();
    let dictionary: Dictionary = [("ა", "a")].into_iter().collect();

    let result = dictionary.save(blocker.join("dictionary.json"));

    assert!(matches!(result, Err(DictionaryError::Write { .. })));
}

#[test]
fn test_put_shouldOverwriteWithNewTranslation() {
    let mut dictionary = Dictionary::new();
    dictionary.put("ბანკი", "Bank");
    dictionary.put("ბანკი", "The bank");
    assert_eq!(dictionary.get("ბანკი"), Some("The bank"));
    assert_eq!(dictionary.len(), 1);
}

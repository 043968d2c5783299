/*!
 * End-to-end tests of the file workflow through the controller
 */

use bogclient::app_controller::Controller;
use bogclient::file_utils::{DocumentFormat, FileManager};
use bogclient::providers::mock::MockProvider;
use bogclient::statement::AccountStatements;
use bogclient::translation::Dictionary;
use crate::common;

#[tokio::test]
async fn test_translateFile_withStatement_shouldWriteLocalizedDocument() {
    common::init_logging();
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::copy_resource(temp_dir.path(), "statement_sample.json").unwrap();
    let output = temp_dir.path().join("out").join("statement.en.json");
    let controller = Controller::with_config(common::config_with_dictionary(temp_dir.path())).unwrap();
    let provider = MockProvider::working().with_translations(common::statement_translations());

    let report = controller
        .translate_file_with(&provider, &input, &output, None)
        .await
        .unwrap();

    assert_eq!(report.len(), 4);
    assert_eq!(report["ხელფასი"], "Salary");

    let translated: AccountStatements = FileManager::read_json(&output).unwrap();
    let record = &translated.combined[0].records[0];
    assert_eq!(record.entry_comment, "Salary");
    assert_eq!(record.sender_details.name, "Georgia LLC");
    assert_eq!(record.entry_amount_credit, 2500.0);
}

#[tokio::test]
async fn test_translateFile_shouldPersistDictionaryForNextRun() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::copy_resource(temp_dir.path(), "statement_sample.json").unwrap();
    let output = temp_dir.path().join("statement.en.json");
    let controller = Controller::with_config(common::config_with_dictionary(temp_dir.path())).unwrap();

    let first = MockProvider::working().with_translations(common::statement_translations());
    controller
        .translate_file_with(&first, &input, &output, Some(DocumentFormat::Statements))
        .await
        .unwrap();

    let saved = Dictionary::load(temp_dir.path().join("dictionary.json")).unwrap();
    assert_eq!(saved.len(), 4);

    let second = MockProvider::failing();
    let report = controller
        .translate_file_with(&second, &input, &output, Some(DocumentFormat::Statements))
        .await
        .unwrap();

    assert_eq!(report.len(), 4);
    assert_eq!(second.request_count(), 0);
}

#[tokio::test]
async fn test_translateFile_withNoSave_shouldLeaveDictionaryFileAbsent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::copy_resource(temp_dir.path(), "statement_sample.json").unwrap();
    let output = temp_dir.path().join("statement.en.json");
    let controller = Controller::with_config(common::config_with_dictionary(temp_dir.path()))
        .unwrap()
        .without_dictionary_save();

    controller
        .translate_file_with(&MockProvider::working(), &input, &output, None)
        .await
        .unwrap();

    assert!(!temp_dir.path().join("dictionary.json").exists());
    assert!(output.exists());
}

#[tokio::test]
async fn test_translateFile_withFailingProvider_shouldNotWriteOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::copy_resource(temp_dir.path(), "statement_sample.json").unwrap();
    let output = temp_dir.path().join("statement.en.json");
    let controller = Controller::with_config(common::config_with_dictionary(temp_dir.path())).unwrap();

    let result = controller
        .translate_file_with(&MockProvider::failing(), &input, &output, None)
        .await;

    assert!(result.is_err());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_translateFile_withGenericJson_shouldKeepStructure() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::copy_resource(temp_dir.path(), "document_sample.json").unwrap();
    let output = temp_dir.path().join("document.en.json");
    let controller = Controller::with_config(common::config_with_dictionary(temp_dir.path())).unwrap();

    let report = controller
        .translate_file_with(&MockProvider::working(), &input, &output, None)
        .await
        .unwrap();

    let translated: serde_json::Value = FileManager::read_json(&output).unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(translated["title"], MockProvider::default_translation("ანგარიშის ამონაწერი"));
    assert_eq!(translated["items"][0]["label"], MockProvider::default_translation("ხელფასი"));
    assert_eq!(translated["items"][1]["amount"], 1800);
    assert_eq!(translated["bank"], "Bank of Georgia");
    assert!(translated["items"][2]["note"].is_null());
}

#[test]
fn test_extractFile_shouldListPendingTexts() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::copy_resource(temp_dir.path(), "statement_sample.json").unwrap();
    let dictionary: Dictionary = [("ხელფასი", "Salary")].into_iter().collect();
    dictionary.save(temp_dir.path().join("dictionary.json")).unwrap();
    let controller = Controller::with_config(common::config_with_dictionary(temp_dir.path())).unwrap();

    let pending = controller.extract_file(&input, None).unwrap();

    assert_eq!(
        pending,
        vec![
            "საბანკო მომსახურების საკომისიო",
            "საქართველოს ეროვნული ბანკი",
            "შპს საქართველო",
        ]
    );
}

#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = bogclient::Config::default();
    config.target_language = "ka".to_string();

    assert!(Controller::with_config(config).is_err());
}

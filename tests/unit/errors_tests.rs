/*!
 * Tests for error types and conversions
 */

use bogclient::errors::{DictionaryError, ErrorCategory, ProviderError, TranslationError, TraversalError};

#[test]
fn test_providerError_missingApiKey_shouldNameEnvironmentVariable() {
    let error = ProviderError::MissingApiKey {
        provider: "OpenAI".to_string(),
        env_var: "BOG_OPENAI_APIKEY".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("OpenAI"));
    assert!(display.contains("BOG_OPENAI_APIKEY"));
    assert_eq!(error.category(), ErrorCategory::Configuration);
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_serviceError_shouldDisplayAllParts() {
    let error = ProviderError::ServiceError {
        message: "Invalid model".to_string(),
        kind: "invalid_request_error".to_string(),
        code: "model_not_found".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("Invalid model"));
    assert!(display.contains("invalid_request_error"));
    assert!(display.contains("model_not_found"));
}

#[test]
fn test_providerError_categories_shouldMatchTaxonomy() {
    assert_eq!(ProviderError::RequestFailed("x".into()).category(), ErrorCategory::Transport);
    assert_eq!(ProviderError::ConnectionError("x".into()).category(), ErrorCategory::Transport);
    assert_eq!(ProviderError::Timeout(5).category(), ErrorCategory::Transport);
    assert_eq!(ProviderError::ParseError("x".into()).category(), ErrorCategory::Protocol);
    assert_eq!(ProviderError::EmptyResponse.category(), ErrorCategory::Protocol);
    assert_eq!(
        ProviderError::FingerprintCollision {
            fingerprint: 1,
            first: "ა".into(),
            second: "ბ".into(),
        }
        .category(),
        ErrorCategory::Protocol
    );
}

#[test]
fn test_providerError_isRetryable_shouldOnlyHoldForTransport() {
    assert!(ProviderError::Timeout(30).is_retryable());
    assert!(ProviderError::ConnectionError("refused".into()).is_retryable());
    assert!(!ProviderError::EmptyResponse.is_retryable());
    assert!(
        !ProviderError::MissingApiKey {
            provider: "Google Translate".into(),
            env_var: "BOG_GOOGLE_APIKEY".into(),
        }
        .is_retryable()
    );
}

#[test]
fn test_translationError_fromProviderError_shouldKeepCategory() {
    let error: TranslationError = ProviderError::Timeout(10).into();
    assert!(matches!(error, TranslationError::Provider(_)));
    assert_eq!(error.category(), ErrorCategory::Transport);
}

#[test]
fn test_translationError_fromDictionaryError_shouldBePersistence() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: TranslationError = DictionaryError::Serialize(parse_error).into();
    assert_eq!(error.category(), ErrorCategory::Persistence);
}

#[test]
fn test_translationError_fromTraversalError_shouldBeTraversal() {
    let error: TranslationError = TraversalError::DepthExceeded { limit: 4 }.into();
    assert_eq!(error.category(), ErrorCategory::Traversal);
    assert!(format!("{}", error).contains('4'));
}

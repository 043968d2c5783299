/*!
 * Error types for the bogclient application.
 *
 * This module contains custom error types for the different parts of the
 * localization engine, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Broad classes of failure, used by callers to decide whether to retry,
/// skip translation or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid provider settings, no network call was made
    Configuration,
    /// The provider could not be reached or did not answer in time
    Transport,
    /// The provider answered with something unusable
    Protocol,
    /// Reading or writing the dictionary file failed
    Persistence,
    /// The document could not be walked
    Traversal,
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key in the configuration nor in the environment
    #[error("Missing API key for {provider}, set it in the config or use the {env_var} environment variable")]
    MissingApiKey {
        /// Provider display name
        provider: String,
        /// Environment variable that was consulted
        env_var: String,
    },

    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete before its deadline
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error returned by the API itself as a non-success HTTP status
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Explicit error payload in an otherwise readable response body
    #[error("Service error: {message} (type: {kind}, code: {code})")]
    ServiceError {
        /// Message reported by the service
        message: String,
        /// Error type reported by the service
        kind: String,
        /// Error code reported by the service
        code: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The service answered without any content to translate from
    #[error("Unexpected response format: empty content")]
    EmptyResponse,

    /// Two different texts of one batch share a fingerprint
    #[error("Fingerprint collision ({fingerprint}) between '{first}' and '{second}'")]
    FingerprintCollision {
        /// The shared fingerprint
        fingerprint: u64,
        /// First text carrying the fingerprint
        first: String,
        /// Second text carrying the fingerprint
        second: String,
    },
}

impl ProviderError {
    /// Category of this error within the engine's taxonomy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingApiKey { .. } => ErrorCategory::Configuration,
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::Timeout(_) => {
                ErrorCategory::Transport
            }
            Self::ApiError { .. }
            | Self::ServiceError { .. }
            | Self::ParseError(_)
            | Self::EmptyResponse
            | Self::FingerprintCollision { .. } => ErrorCategory::Protocol,
        }
    }

    /// Whether re-dispatching the same batch may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Transport)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors reading or writing the persisted dictionary
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The dictionary file exists but could not be read
    #[error("Failed to read dictionary {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dictionary file is not a flat JSON object of strings
    #[error("Failed to parse dictionary {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dictionary could not be encoded
    #[error("Failed to serialize dictionary: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The dictionary file could not be written
    #[error("Failed to write dictionary {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while walking a document
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TraversalError {
    /// The document nests deeper than the walker accepts
    #[error("Document nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error with the persisted dictionary
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Error walking the document
    #[error("Traversal error: {0}")]
    Traversal(#[from] TraversalError),
}

impl TranslationError {
    /// Category of this error within the engine's taxonomy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Provider(e) => e.category(),
            Self::Dictionary(_) => ErrorCategory::Persistence,
            Self::Traversal(_) => ErrorCategory::Traversal,
        }
    }
}

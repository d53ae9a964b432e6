//! Error types for provider operations.

use thiserror::Error;

use demo_client::ClientError;

/// Errors that can occur while configuring the provider or managing
/// resources.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A backend client could not be constructed.
    #[error("failed to create {backend} client: {source}")]
    Backend {
        backend: &'static str,
        #[source]
        source: ClientError,
    },

    /// A backend operation failed.
    #[error("{operation} failure: {source}")]
    Client {
        operation: &'static str,
        #[source]
        source: ClientError,
    },

    /// A resource was expected to exist but the backend reports it absent.
    #[error("resource {id} does not exist")]
    Missing { id: String },

    /// Encoding a request or decoding a response payload failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while loading configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    pub(crate) fn client(operation: &'static str, source: ClientError) -> Self {
        Self::Client { operation, source }
    }
}

/// Convenience type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

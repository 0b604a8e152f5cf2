//! Error handling for the encryption service

use std::path::PathBuf;

use thiserror::Error;

/// Error type for scheme, key store and service operations
#[derive(Error, Debug)]
pub enum Error {
    /// Encrypt or decrypt attempted without key material
    #[error("Key material has not been initialized")]
    KeyNotInitialized,

    /// Input is not a ciphertext
    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Message polynomial could not be decoded
    #[error("Message decoding failed: {0}")]
    DecodeFailure(String),

    /// Key file could not be read or written
    #[error("Key store I/O error at {path}: {source}")]
    KeyStore {
        /// Key file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Polynomial arithmetic error
    #[error("Polynomial error: {0}")]
    Algorithm(#[from] kyberlink_algorithms::Error),

    /// Hardware bridge error
    #[error("Hardware error: {0}")]
    Hardware(#[from] kyberlink_hardware::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, Error>;

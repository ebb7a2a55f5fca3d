//! Unified error type for reviver.

use thiserror::Error;

/// Errors that can occur while reviving a photo.
#[derive(Debug, Error)]
pub enum ReviveError {
    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input photo could not be read from disk.
    #[error("Failed to read the image file")]
    Read(#[source] std::io::Error),

    /// The transform service failed; the message is surfaced to the user verbatim.
    #[error("{0}")]
    Transform(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No API key configured.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}

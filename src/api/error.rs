use thiserror::Error;

/// Failure of a single backend call.
///
/// The display text becomes the slice error string; the user only ever sees
/// the per-operation notification message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {context} failed: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context} returned HTTP {status}")]
    Status { context: String, status: u16 },

    #[error("Unexpected response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),

    #[error("{0} is not supported for this resource")]
    Unsupported(&'static str),
}

use std::path::PathBuf;

use ecoleta_core::types::DbId;

/// Errors from the registration client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A service returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `message` from a JSON error body, or the raw body.
        message: String,
    },

    /// The directory has no point with this id.
    #[error("Point {0} not found")]
    PointNotFound(DbId),

    /// The registration form is incomplete or inconsistent.
    #[error("Invalid form: {0}")]
    InvalidForm(String),

    /// A local file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a failed response body, preferring
    /// the `message` field of a JSON error envelope.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| body.to_string());
        ClientError::Api { status, message }
    }
}

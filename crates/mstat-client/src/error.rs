use thiserror::Error;

/// Errors returned by the Mirakl status export client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error {status} {reason}\n\n{body}")]
    Api {
        status: u16,
        reason: String,
        /// Response body, truncated for display.
        body: String,
    },

    #[error("invalid channel URL \"{url}\": {reason}")]
    InvalidChannelUrl { url: String, reason: String },

    /// The API key cannot be sent as an HTTP header value.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}

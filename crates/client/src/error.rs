/// Errors from the notebook API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },

    /// An action needed state the client does not have yet.
    #[error("{0}")]
    InvalidAction(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

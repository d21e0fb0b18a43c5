use thiserror::Error;

/// Everything that can go wrong when talking to the academy backend or
/// preparing a request for it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    /// The confirmation record exists but the payment webhook has not been
    /// applied yet. Only the confirmation endpoints map 403 to this; the
    /// poller treats it as transient.
    #[error("booking confirmation is not ready yet")]
    NotReady,

    #[error("validation: {0}")]
    Validation(String),

    #[error("failed to decode backend response: {0}")]
    Decode(String),

    #[error("configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True for errors worth retrying in the confirmation flow. Anything
    /// else is terminal on first sight.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::NotReady)
    }
}

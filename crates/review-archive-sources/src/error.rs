use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised by the Steam-facing code.
///
/// Nothing here is retried or recovered from; callers propagate these until
/// the run terminates.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("{0}")]
    Parse(String),
}

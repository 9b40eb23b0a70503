//! Store error kinds
//!
//! Closed set of ways a fetch can fail. The controller keeps the value and
//! renders it to operator-facing text in one place (`FetchError::describe`).

/// Fallback text when no failure cause can be shown
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Measurement Store fetch failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Store answered with a non-success status
    #[error("HTTP error {status}")]
    Http { status: u16 },

    /// Request never produced a response (refused, DNS, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected measurement array
    #[error("Decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Operator-facing summary
    ///
    /// Includes the status code for HTTP failures; structural decode detail
    /// is not shown.
    pub fn describe(&self) -> String {
        match self {
            FetchError::Http { status } => format!("Request failed with status {}", status),
            FetchError::Network(detail) if !detail.trim().is_empty() => {
                format!("Network error: {}", detail)
            }
            FetchError::Network(_) | FetchError::Decode(_) => UNKNOWN_ERROR.to_string(),
        }
    }

    /// HTTP status code, if the store answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

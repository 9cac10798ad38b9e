//! Client error types.
//!
//! API failures are reported through [`ChatResponse`](brochat_protocol::ChatResponse)
//! codes. `ClientError` covers everything around them: configuration,
//! secrets, local I/O and the CLI.

use brochat_protocol::{BroChatError, ProtocolError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A secret reference could not be resolved.
    #[error("secret error: {0}")]
    Secret(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON output or input failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A feed envelope could not be encoded or decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The BroChat API reported a failure.
    #[error("{0}")]
    Api(#[from] BroChatError),
}

impl ClientError {
    /// Returns the response code for API failures.
    pub fn code(&self) -> Option<brochat_protocol::ResponseCode> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brochat_protocol::ResponseCode;

    #[test]
    fn api_error_displays_description_and_details() {
        let err: ClientError = BroChatError::new(ResponseCode::NOT_FOUND, ["no such room"]).into();
        assert_eq!(err.to_string(), "resource not found: no such room");
        assert_eq!(err.code(), Some(ResponseCode::NOT_FOUND));
    }

    #[test]
    fn config_error_has_no_code() {
        let err = ClientError::Config("missing base_url".to_string());
        assert_eq!(err.to_string(), "configuration error: missing base_url");
        assert_eq!(err.code(), None);
    }
}

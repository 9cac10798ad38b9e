//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding feed envelopes.
///
/// An unrecognized feed type is not an error; see
/// [`FeedEvent::Unrecognized`](crate::FeedEvent::Unrecognized).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// No decoder is registered for the envelope's content type.
    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    /// A decoder is registered but the payload does not parse.
    #[error("malformed {feed_type} payload: {source}")]
    MalformedPayload {
        feed_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope bytes are not a valid feed message.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),
}

impl ProtocolError {
    /// Stable label for counting failures by kind.
    ///
    /// `unsupported_content_type` and `unrecognized_type` (not an error)
    /// indicate version drift between peers; `malformed_payload` and
    /// `malformed_envelope` indicate corruption.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "serialization",
            Self::UnsupportedContentType { .. } => "unsupported_content_type",
            Self::MalformedPayload { .. } => "malformed_payload",
            Self::MalformedEnvelope(_) => "malformed_envelope",
        }
    }

    /// Returns true if the failure means the sender sent corrupt data.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::MalformedPayload { .. } | Self::MalformedEnvelope(_)
        )
    }
}

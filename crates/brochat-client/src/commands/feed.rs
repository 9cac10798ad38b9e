//! Feed envelope commands.

use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::debug;

use brochat_protocol::FeedMessage;

use crate::error::ClientResult;

use super::print_json;

/// A decoded envelope, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFeed {
    #[serde(rename = "type")]
    pub message_type: String,
    pub content_type: String,
    /// `recognized` or `unrecognized_type`.
    pub kind: &'static str,
    /// The decoded payload; absent for unrecognized types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Decodes raw envelope bytes.
///
/// Recognized types are checked against their payload shape before the
/// payload is rendered.
pub fn decode_envelope(bytes: &[u8]) -> ClientResult<DecodedFeed> {
    let message = FeedMessage::from_bytes(bytes)?;
    let event = message.decode()?;
    debug!(feed_type = %message.message_type.as_str(), kind = event.kind(), "decoded envelope");

    let payload = if event.is_recognized() {
        Some(message.decode_payload::<Value>()?)
    } else {
        None
    };

    Ok(DecodedFeed {
        message_type: message.message_type.as_str().to_string(),
        content_type: message.content_type.clone(),
        kind: event.kind(),
        payload,
    })
}

/// Reads an envelope from stdin and prints it decoded.
pub async fn decode_stdin() -> ClientResult<()> {
    let mut input = Vec::new();
    tokio::io::stdin().read_to_end(&mut input).await?;
    print_json(&decode_envelope(input.trim_ascii())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brochat_protocol::{FeedMessageType, ProtocolError, SetActiveChannelRequest};

    use crate::error::ClientError;

    #[test]
    fn decodes_known_envelope() {
        let message = FeedMessage::encode_json(
            FeedMessageType::SetActiveChannelRequest,
            &SetActiveChannelRequest {
                channel_id: "c1".to_string(),
            },
        )
        .unwrap();
        let decoded = decode_envelope(&message.to_bytes().unwrap()).unwrap();

        assert_eq!(decoded.kind, "recognized");
        assert_eq!(decoded.payload, Some(serde_json::json!({"channel_id": "c1"})));
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let bytes = br#"{"type":"typing-indicator","content_type":"application/json","content":"e30="}"#;
        let decoded = decode_envelope(bytes).unwrap();
        assert_eq!(decoded.message_type, "typing-indicator");
        assert_eq!(decoded.kind, "unrecognized_type");
        assert_eq!(decoded.payload, None);
    }

    #[test]
    fn unsupported_content_type_fails() {
        let bytes = br#"{"type":"brochat:feed_message_type:set_active_channel_request","content_type":"application/msgpack","content":"e30="}"#;
        let err = decode_envelope(bytes).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(ProtocolError::UnsupportedContentType { .. })
        ));
    }

    #[test]
    fn garbage_is_malformed_envelope() {
        let err = decode_envelope(b"not json").unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(ProtocolError::MalformedEnvelope(_))
        ));
    }
}

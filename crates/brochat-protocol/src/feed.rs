//! Feed envelope protocol.
//!
//! The feed is the real-time push channel from the server to connected
//! clients. Every push is a [`FeedMessage`] envelope:
//!
//! ```text
//! {
//!   "type":         "brochat:feed_message_type:<event>",
//!   "content_type": "application/json",
//!   "content":      "<base64 payload bytes>"
//! }
//! ```
//!
//! `type` selects the payload shape and `content_type` selects how the
//! bytes are decoded; both are checked before the payload is touched.
//! Receivers must tolerate tags from newer peers, so an unknown `type` is
//! returned as [`FeedEvent::Unrecognized`] rather than an error.
//!
//! Envelopes carry no sequencing information. Ordering across envelopes is
//! whatever the underlying connection provides.

use std::fmt;

use brochat_core::{ChatMessage, Room, UserInfo};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ProtocolError, ProtocolResult};

/// Media type of JSON encoded payloads.
pub const CONTENT_TYPE_JSON: &str = "application/json";

const TAG_PREFIX: &str = "brochat:feed_message_type:";

/// Feed message type tag.
///
/// Tags not known to this version are kept verbatim in
/// [`FeedMessageType::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedMessageType {
    ChatMessageRequest,
    SetActiveChannelRequest,
    UserOnline,
    UserOffline,
    ChatNotification,
    ChatMessage,
    FriendRequestReceived,
    FriendRequestAccepted,
    RoomCreated,
    UserJoinedRoom,
    UserProfileUpdated,
    Unknown(String),
}

impl FeedMessageType {
    /// Every tag defined in this version.
    pub const KNOWN: [Self; 11] = [
        Self::ChatMessageRequest,
        Self::SetActiveChannelRequest,
        Self::UserOnline,
        Self::UserOffline,
        Self::ChatNotification,
        Self::ChatMessage,
        Self::FriendRequestReceived,
        Self::FriendRequestAccepted,
        Self::RoomCreated,
        Self::UserJoinedRoom,
        Self::UserProfileUpdated,
    ];

    /// Returns the wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ChatMessageRequest => "brochat:feed_message_type:chat_message_request",
            Self::SetActiveChannelRequest => {
                "brochat:feed_message_type:set_active_channel_request"
            }
            Self::UserOnline => "brochat:feed_message_type:user_online_event",
            Self::UserOffline => "brochat:feed_message_type:user_offline_event",
            Self::ChatNotification => "brochat:feed_message_type:chat_notification",
            Self::ChatMessage => "brochat:feed_message_type:chat_message",
            // The misspelling is part of the wire format.
            Self::FriendRequestReceived => "brochat:feed_message_type:friend_request_recieved",
            Self::FriendRequestAccepted => "brochat:feed_message_type:friend_request_accepted",
            Self::RoomCreated => "brochat:feed_message_type:room_created",
            Self::UserJoinedRoom => "brochat:feed_message_type:user_joined_room",
            Self::UserProfileUpdated => "brochat:feed_message_type:user_profile_updated",
            Self::Unknown(tag) => tag,
        }
    }

    /// Parses a wire tag.
    pub fn from_tag(tag: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == tag)
            .cloned()
            .unwrap_or_else(|| Self::Unknown(tag.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Short event name without the namespace prefix, for logs.
    pub fn short_name(&self) -> &str {
        let tag = self.as_str();
        tag.strip_prefix(TAG_PREFIX).unwrap_or(tag)
    }
}

impl From<String> for FeedMessageType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<FeedMessageType> for String {
    fn from(value: FeedMessageType) -> Self {
        match value {
            FeedMessageType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FeedMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload encodings.
///
/// Only JSON is defined; other media types are carried so they can be
/// reported, but nothing can be decoded from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Json,
    Other(String),
}

impl ContentType {
    /// Parses a content type, ignoring parameters and case.
    pub fn parse(value: &str) -> Self {
        let media_type = value.split(';').next().unwrap_or_default().trim();
        if media_type.eq_ignore_ascii_case(CONTENT_TYPE_JSON) {
            Self::Json
        } else {
            Self::Other(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Json => CONTENT_TYPE_JSON,
            Self::Other(value) => value,
        }
    }

    /// Encodes a payload.
    pub fn encode<P: Serialize>(&self, payload: &P) -> ProtocolResult<Vec<u8>> {
        match self {
            Self::Json => serde_json::to_vec(payload).map_err(ProtocolError::Serialization),
            Self::Other(content_type) => Err(ProtocolError::UnsupportedContentType {
                content_type: content_type.clone(),
            }),
        }
    }

    /// Decodes a payload of the given feed type.
    pub fn decode<P: DeserializeOwned>(
        &self,
        feed_type: &FeedMessageType,
        content: &[u8],
    ) -> ProtocolResult<P> {
        match self {
            Self::Json => {
                serde_json::from_slice(content).map_err(|source| ProtocolError::MalformedPayload {
                    feed_type: feed_type.short_name().to_string(),
                    source,
                })
            }
            Self::Other(content_type) => Err(ProtocolError::UnsupportedContentType {
                content_type: content_type.clone(),
            }),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope for pushed feed messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMessage {
    /// The message type.
    #[serde(rename = "type")]
    pub message_type: FeedMessageType,
    /// How `content` is encoded.
    pub content_type: String,
    /// The encoded payload.
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl FeedMessage {
    /// Encodes a payload as JSON and stamps the type.
    pub fn encode_json<P: Serialize>(
        message_type: FeedMessageType,
        payload: &P,
    ) -> ProtocolResult<Self> {
        Self::encode(message_type, &ContentType::Json, payload)
    }

    /// Encodes a payload with the given content type and stamps the type.
    pub fn encode<P: Serialize>(
        message_type: FeedMessageType,
        content_type: &ContentType,
        payload: &P,
    ) -> ProtocolResult<Self> {
        let content = content_type.encode(payload)?;
        Ok(Self {
            message_type,
            content_type: content_type.as_str().to_string(),
            content,
        })
    }

    /// Builds the envelope for a feed event.
    ///
    /// Unrecognized events are passed through unchanged.
    pub fn from_event(event: &FeedEvent) -> ProtocolResult<Self> {
        let message_type = event.message_type();
        match event {
            FeedEvent::ChatMessageRequest(p) => Self::encode_json(message_type, p),
            FeedEvent::SetActiveChannelRequest(p) => Self::encode_json(message_type, p),
            FeedEvent::UserOnline(p) | FeedEvent::UserOffline(p) => {
                Self::encode_json(message_type, p)
            }
            FeedEvent::ChatNotification(p) => Self::encode_json(message_type, p),
            FeedEvent::ChatMessage(p) => Self::encode_json(message_type, p),
            FeedEvent::FriendRequestReceived(p) => Self::encode_json(message_type, p),
            FeedEvent::FriendRequestAccepted(p) => Self::encode_json(message_type, p),
            FeedEvent::RoomCreated(p) => Self::encode_json(message_type, p),
            FeedEvent::UserJoinedRoom(p) => Self::encode_json(message_type, p),
            FeedEvent::UserProfileUpdated(p) => Self::encode_json(message_type, p),
            FeedEvent::Unrecognized(raw) => Ok(raw.clone()),
        }
    }

    /// Returns the parsed content type.
    pub fn parsed_content_type(&self) -> ContentType {
        ContentType::parse(&self.content_type)
    }

    /// Decodes the payload into a specific shape, checking the content type.
    pub fn decode_payload<P: DeserializeOwned>(&self) -> ProtocolResult<P> {
        self.parsed_content_type()
            .decode(&self.message_type, &self.content)
    }

    /// Decodes the envelope into a feed event.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::UnsupportedContentType`] if no decoder exists for the content type
    /// - [`ProtocolError::MalformedPayload`] if the payload does not match the type
    pub fn decode(&self) -> ProtocolResult<FeedEvent> {
        let event = match self.message_type {
            FeedMessageType::Unknown(ref tag) => {
                info!(
                    feed_type = %tag,
                    content_type = %self.content_type,
                    "skipping unrecognized feed message"
                );
                return Ok(FeedEvent::Unrecognized(self.clone()));
            }
            FeedMessageType::ChatMessageRequest => {
                FeedEvent::ChatMessageRequest(self.decode_payload()?)
            }
            FeedMessageType::SetActiveChannelRequest => {
                FeedEvent::SetActiveChannelRequest(self.decode_payload()?)
            }
            FeedMessageType::UserOnline => FeedEvent::UserOnline(self.decode_payload()?),
            FeedMessageType::UserOffline => FeedEvent::UserOffline(self.decode_payload()?),
            FeedMessageType::ChatNotification => {
                FeedEvent::ChatNotification(self.decode_payload()?)
            }
            FeedMessageType::ChatMessage => FeedEvent::ChatMessage(self.decode_payload()?),
            FeedMessageType::FriendRequestReceived => {
                FeedEvent::FriendRequestReceived(self.decode_payload()?)
            }
            FeedMessageType::FriendRequestAccepted => {
                FeedEvent::FriendRequestAccepted(self.decode_payload()?)
            }
            FeedMessageType::RoomCreated => FeedEvent::RoomCreated(self.decode_payload()?),
            FeedMessageType::UserJoinedRoom => FeedEvent::UserJoinedRoom(self.decode_payload()?),
            FeedMessageType::UserProfileUpdated => {
                FeedEvent::UserProfileUpdated(self.decode_payload()?)
            }
        };
        debug!(feed_type = %self.message_type.short_name(), "decoded feed message");
        Ok(event)
    }

    /// Serializes the envelope to the bytes sent over the feed connection.
    pub fn to_bytes(&self) -> ProtocolResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(ProtocolError::Serialization)
    }

    /// Parses envelope bytes received from the feed connection.
    pub fn from_bytes(bytes: &[u8]) -> ProtocolResult<Self> {
        serde_json::from_slice(bytes).map_err(ProtocolError::MalformedEnvelope)
    }
}

/// Decodes raw envelope bytes straight into a feed event.
pub fn decode_feed_bytes(bytes: &[u8]) -> ProtocolResult<FeedEvent> {
    FeedMessage::from_bytes(bytes)?.decode()
}

/// A decoded feed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    ChatMessageRequest(ChatMessageRequest),
    SetActiveChannelRequest(SetActiveChannelRequest),
    UserOnline(UserPresenceEvent),
    UserOffline(UserPresenceEvent),
    ChatNotification(ChatNotification),
    ChatMessage(ChatMessage),
    FriendRequestReceived(FriendRequestReceivedEvent),
    FriendRequestAccepted(FriendRequestAcceptedEvent),
    RoomCreated(RoomCreatedEvent),
    UserJoinedRoom(UserJoinedRoomEvent),
    UserProfileUpdated(UserProfileUpdatedEvent),
    /// A type this version does not understand; the envelope is kept intact.
    Unrecognized(FeedMessage),
}

impl FeedEvent {
    /// Returns the type tag of the event.
    pub fn message_type(&self) -> FeedMessageType {
        match self {
            Self::ChatMessageRequest(_) => FeedMessageType::ChatMessageRequest,
            Self::SetActiveChannelRequest(_) => FeedMessageType::SetActiveChannelRequest,
            Self::UserOnline(_) => FeedMessageType::UserOnline,
            Self::UserOffline(_) => FeedMessageType::UserOffline,
            Self::ChatNotification(_) => FeedMessageType::ChatNotification,
            Self::ChatMessage(_) => FeedMessageType::ChatMessage,
            Self::FriendRequestReceived(_) => FeedMessageType::FriendRequestReceived,
            Self::FriendRequestAccepted(_) => FeedMessageType::FriendRequestAccepted,
            Self::RoomCreated(_) => FeedMessageType::RoomCreated,
            Self::UserJoinedRoom(_) => FeedMessageType::UserJoinedRoom,
            Self::UserProfileUpdated(_) => FeedMessageType::UserProfileUpdated,
            Self::Unrecognized(raw) => raw.message_type.clone(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Stable label for counting events by outcome.
    pub fn kind(&self) -> &'static str {
        if self.is_recognized() {
            "recognized"
        } else {
            "unrecognized_type"
        }
    }
}

/// An unprocessed outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    /// The channel the message is sent in.
    pub channel_id: String,
    /// The message text.
    pub content: String,
}

/// Unread activity in a channel the user is not watching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatNotification {
    pub channel_id: String,
}

/// A request to make a channel the user's active channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetActiveChannelRequest {
    pub channel_id: String,
}

/// A user came online or went offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPresenceEvent {
    pub user: UserInfo,
}

/// A user received a friend request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestReceivedEvent {
    /// The user that sent the request.
    pub initiating_user: UserInfo,
    /// The user the request was sent to.
    pub requested_user: UserInfo,
}

/// A friend request was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestAcceptedEvent {
    /// The user that sent the original request.
    pub initiating_user: UserInfo,
    /// The user that accepted it.
    pub accepting_user: UserInfo,
    /// The direct message channel now shared by both users.
    pub direct_message_channel: String,
}

/// A room was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCreatedEvent {
    pub room: Room,
}

/// A user joined a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserJoinedRoomEvent {
    pub room_id: String,
    pub user: UserInfo,
}

/// Part of the user's profile is stale and should be re-fetched.
///
/// Carries only which areas changed, not the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileUpdatedEvent {
    pub reason: UserProfileUpdateCode,
}

/// Profile areas that went stale.
///
/// A flag set: one event may mark several areas at once. Serialized as the
/// raw integer; bits unknown to this version are retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfileUpdateCode(u8);

bitflags::bitflags! {
    impl UserProfileUpdateCode: u8 {
        /// The user's rooms changed.
        const ROOMS = 0x1;
        /// The user's relationships changed.
        const RELATIONSHIPS = 0x2;
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    // `null` is how an empty byte slice may arrive from the server.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brochat_core::RoomMembershipModel;
    use chrono::{TimeZone, Utc};

    fn user(id: &str) -> UserInfo {
        UserInfo::new(id, format!("user-{}", id), Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }

    fn every_event() -> Vec<FeedEvent> {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        vec![
            FeedEvent::ChatMessageRequest(ChatMessageRequest {
                channel_id: "c1".to_string(),
                content: "hello".to_string(),
            }),
            FeedEvent::SetActiveChannelRequest(SetActiveChannelRequest {
                channel_id: "c1".to_string(),
            }),
            FeedEvent::UserOnline(UserPresenceEvent { user: user("a") }),
            FeedEvent::UserOffline(UserPresenceEvent { user: user("b") }),
            FeedEvent::ChatNotification(ChatNotification {
                channel_id: "c2".to_string(),
            }),
            FeedEvent::ChatMessage(ChatMessage {
                id: "m1".to_string(),
                channel_id: "c1".to_string(),
                sender_user_id: "a".to_string(),
                content: "hi there".to_string(),
                received_at_utc: when,
            }),
            FeedEvent::FriendRequestReceived(FriendRequestReceivedEvent {
                initiating_user: user("a"),
                requested_user: user("b"),
            }),
            FeedEvent::FriendRequestAccepted(FriendRequestAcceptedEvent {
                initiating_user: user("a"),
                accepting_user: user("b"),
                direct_message_channel: "dm-ab".to_string(),
            }),
            FeedEvent::RoomCreated(RoomCreatedEvent {
                room: Room {
                    id: "r1".to_string(),
                    name: "general".to_string(),
                    channel_id: "c9".to_string(),
                    owner: user("a"),
                    membership_model: RoomMembershipModel::Public,
                    created_at_utc: when,
                },
            }),
            FeedEvent::UserJoinedRoom(UserJoinedRoomEvent {
                room_id: "r1".to_string(),
                user: user("c"),
            }),
            FeedEvent::UserProfileUpdated(UserProfileUpdatedEvent {
                reason: UserProfileUpdateCode::ROOMS | UserProfileUpdateCode::RELATIONSHIPS,
            }),
        ]
    }

    #[test]
    fn every_event_survives_the_envelope() {
        let events = every_event();
        assert_eq!(events.len(), FeedMessageType::KNOWN.len());

        for event in events {
            let message = FeedMessage::from_event(&event).unwrap();
            assert_eq!(message.message_type, event.message_type());
            assert_eq!(message.content_type, CONTENT_TYPE_JSON);

            let bytes = message.to_bytes().unwrap();
            let decoded = decode_feed_bytes(&bytes).unwrap();
            assert_eq!(decoded, event);
        }
    }

    #[test]
    fn tags_match_the_wire() {
        assert_eq!(
            FeedMessageType::FriendRequestReceived.as_str(),
            "brochat:feed_message_type:friend_request_recieved"
        );
        for known in FeedMessageType::KNOWN {
            assert_eq!(FeedMessageType::from_tag(known.as_str()), known);
        }
        assert_eq!(FeedMessageType::UserOnline.short_name(), "user_online_event");
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let message = FeedMessage {
            message_type: FeedMessageType::from_tag("brochat:feed_message_type:typing_started"),
            content_type: CONTENT_TYPE_JSON.to_string(),
            content: br#"{"channel_id":"c1"}"#.to_vec(),
        };
        let event = message.decode().unwrap();
        assert!(!event.is_recognized());
        assert_eq!(event.kind(), "unrecognized_type");
        assert_eq!(event, FeedEvent::Unrecognized(message.clone()));

        // Re-encoding passes the envelope through unchanged.
        assert_eq!(FeedMessage::from_event(&event).unwrap(), message);
    }

    #[test]
    fn unknown_type_wins_over_unknown_content_type() {
        let message = FeedMessage {
            message_type: FeedMessageType::from_tag("future:thing"),
            content_type: "application/x-protobuf".to_string(),
            content: vec![0x08, 0x96, 0x01],
        };
        assert!(matches!(message.decode(), Ok(FeedEvent::Unrecognized(_))));
    }

    #[test]
    fn unsupported_content_type_is_distinct() {
        let message = FeedMessage {
            message_type: FeedMessageType::ChatNotification,
            content_type: "application/cbor".to_string(),
            content: vec![0xa1],
        };
        let err = message.decode().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnsupportedContentType { ref content_type } if content_type == "application/cbor"
        ));
        assert_eq!(err.kind(), "unsupported_content_type");
        assert!(!err.is_corruption());
    }

    #[test]
    fn malformed_payload_is_distinct() {
        let message = FeedMessage {
            message_type: FeedMessageType::ChatNotification,
            content_type: CONTENT_TYPE_JSON.to_string(),
            content: br#"{"channel":"c1"}"#.to_vec(),
        };
        let err = message.decode().unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedPayload { .. }));
        assert_eq!(err.kind(), "malformed_payload");
        assert!(err.is_corruption());
        assert!(err.to_string().contains("chat_notification"));
    }

    #[test]
    fn malformed_envelope() {
        let err = decode_feed_bytes(b"not json").unwrap_err();
        assert_eq!(err.kind(), "malformed_envelope");

        let err = decode_feed_bytes(br#"{"type":"x","content_type":"application/json","content":"%%%"}"#)
            .unwrap_err();
        assert_eq!(err.kind(), "malformed_envelope");
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        assert_eq!(
            ContentType::parse("Application/JSON; charset=utf-8"),
            ContentType::Json
        );
        assert_eq!(
            ContentType::parse("text/plain"),
            ContentType::Other("text/plain".to_string())
        );
    }

    #[test]
    fn encoding_with_unsupported_content_type_fails() {
        let err = FeedMessage::encode(
            FeedMessageType::ChatNotification,
            &ContentType::Other("application/cbor".to_string()),
            &ChatNotification {
                channel_id: "c1".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), "unsupported_content_type");
    }

    #[test]
    fn envelope_wire_shape() {
        let message = FeedMessage::encode_json(
            FeedMessageType::ChatNotification,
            &ChatNotification {
                channel_id: "c1".to_string(),
            },
        )
        .unwrap();
        insta::assert_snapshot!(
            String::from_utf8(message.to_bytes().unwrap()).unwrap(),
            @r#"{"type":"brochat:feed_message_type:chat_notification","content_type":"application/json","content":"eyJjaGFubmVsX2lkIjoiYzEifQ=="}"#
        );
    }

    #[test]
    fn null_content_decodes_as_empty() {
        let message = FeedMessage::from_bytes(
            br#"{"type":"brochat:feed_message_type:room_created","content_type":"application/json","content":null}"#,
        )
        .unwrap();
        assert!(message.content.is_empty());
        assert_eq!(message.decode().unwrap_err().kind(), "malformed_payload");
    }

    #[test]
    fn profile_update_code_is_a_flag_set() {
        let both = UserProfileUpdateCode::ROOMS | UserProfileUpdateCode::RELATIONSHIPS;
        assert!(both.contains(UserProfileUpdateCode::ROOMS));
        assert!(both.contains(UserProfileUpdateCode::RELATIONSHIPS));
        assert_eq!(
            both & UserProfileUpdateCode::ROOMS,
            UserProfileUpdateCode::ROOMS
        );
        assert!(
            !UserProfileUpdateCode::ROOMS.intersects(UserProfileUpdateCode::RELATIONSHIPS)
        );

        let event = UserProfileUpdatedEvent { reason: both };
        assert_eq!(serde_json::to_string(&event).unwrap(), r#"{"reason":3}"#);

        let future: UserProfileUpdatedEvent = serde_json::from_str(r#"{"reason":5}"#).unwrap();
        assert!(future.reason.contains(UserProfileUpdateCode::ROOMS));
        assert_eq!(future.reason.bits(), 5);
    }
}

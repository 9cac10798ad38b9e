//! Wire contract shared by BroChat clients and the server.
//!
//! Three pieces every producer and consumer must agree on:
//!
//! - [`ResponseCode`]: one byte partitioned into server failures (`0..=63`),
//!   client/transport failures (`64..=127`) and successes (`128..`).
//! - [`ChatResponse`]: the outcome of a client operation, pairing a code with
//!   error details and (on success) content.
//! - [`FeedMessage`]: the typed envelope for real-time push events.
//!
//! # Example
//!
//! ```rust
//! use brochat_protocol::{ChatNotification, FeedEvent, FeedMessage, FeedMessageType};
//!
//! let notification = ChatNotification { channel_id: "c1".to_string() };
//! let message = FeedMessage::encode_json(FeedMessageType::ChatNotification, &notification).unwrap();
//! let bytes = message.to_bytes().unwrap();
//!
//! match brochat_protocol::decode_feed_bytes(&bytes).unwrap() {
//!     FeedEvent::ChatNotification(n) => assert_eq!(n.channel_id, "c1"),
//!     other => panic!("unexpected event: {:?}", other),
//! }
//! ```

mod code;
mod error;
mod feed;
mod result;

pub use code::{CLIENT_FAILURE_MAX, CodeRange, ResponseCode, SERVER_FAILURE_MAX, SUCCESS_THRESHOLD};
pub use error::{ProtocolError, ProtocolResult};
pub use feed::{
    CONTENT_TYPE_JSON, ChatMessageRequest, ChatNotification, ContentType, FeedEvent, FeedMessage,
    FeedMessageType, FriendRequestAcceptedEvent, FriendRequestReceivedEvent, RoomCreatedEvent,
    SetActiveChannelRequest, UserJoinedRoomEvent, UserPresenceEvent, UserProfileUpdateCode,
    UserProfileUpdatedEvent, decode_feed_bytes,
};
pub use result::{BroChatError, ChatResponse};

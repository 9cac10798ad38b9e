//! REST resource shapes shared by the client and the chat server.
//!
//! These are the JSON bodies returned by (and sent to) the BroChat API.
//! Field names follow the server's snake_case wire format exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A text message sent in a chat channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The message ID.
    pub id: String,
    /// The channel the message was sent in.
    pub channel_id: String,
    /// The user that sent the message.
    pub sender_user_id: String,
    /// The message text.
    pub content: String,
    /// When the server received the message.
    #[serde(rename = "recieved_at_utc")]
    pub received_at_utc: DateTime<Utc>,
}

/// Minimal identity projection of a user.
///
/// Feed events and listings carry this instead of the full [`User`] aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The user ID (same as the identity service ID).
    pub id: String,
    /// The username.
    pub username: String,
    /// When the user was last online.
    pub last_online_utc: DateTime<Utc>,
}

impl UserInfo {
    /// Creates a user projection.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        last_online_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            last_online_utc,
        }
    }
}

/// The calling user's full profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Relationships with other users.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relationships: Vec<UserRelationship>,
    /// Rooms the user owns or is a member of.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rooms: Vec<Room>,
    pub last_online_utc: DateTime<Utc>,
    pub created_at_utc: DateTime<Utc>,
}

impl User {
    /// Returns the relationships that are established friendships.
    pub fn friends(&self) -> impl Iterator<Item = &UserRelationship> {
        self.relationships
            .iter()
            .filter(|r| r.relationship_type.contains(RelationshipType::FRIEND))
    }

    /// Returns the relationships with a pending incoming friend request.
    pub fn pending_friend_requests(&self) -> impl Iterator<Item = &UserRelationship> {
        self.relationships.iter().filter(|r| {
            r.relationship_type
                .contains(RelationshipType::FRIEND_REQUEST_RECEIVED)
        })
    }
}

/// A relationship between the calling user and another user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRelationship {
    /// The other user's ID.
    pub user_id: String,
    /// The kind of relationship.
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    /// Direct message channel shared with the other user.
    pub direct_message_channel_id: String,
    /// The other user's username.
    pub username: String,
    pub last_online_utc: DateTime<Utc>,
    pub is_online: bool,
}

/// Relationship flags.
///
/// Serialized as the raw integer. Unknown bits sent by a newer server are
/// retained rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipType(u8);

bitflags::bitflags! {
    impl RelationshipType: u8 {
        /// The users are not friends.
        const DEFAULT = 1 << 0;
        /// The users are friends.
        const FRIEND = 1 << 1;
        /// The calling user received a friend request from the other user.
        const FRIEND_REQUEST_RECEIVED = 1 << 2;
        /// The calling user sent a friend request to the other user.
        const FRIENDSHIP_REQUESTED = 1 << 3;
    }
}

/// The kind of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ChannelType {
    /// Direct messages between two users.
    DirectMessage,
    /// Group messages in a room.
    Room,
    /// A channel kind this client does not know about.
    Other(u8),
}

impl From<u8> for ChannelType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::DirectMessage,
            1 => Self::Room,
            other => Self::Other(other),
        }
    }
}

impl From<ChannelType> for u8 {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::DirectMessage => 0,
            ChannelType::Room => 1,
            ChannelType::Other(other) => other,
        }
    }
}

/// A communication channel between two or more users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    /// Channel members.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<UserInfo>,
}

/// Who may join a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomMembershipModel {
    /// The owner's friends may join.
    #[default]
    Friends,
    /// Anyone may join.
    Public,
}

impl RoomMembershipModel {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friends => "friends",
            Self::Public => "public",
        }
    }
}

impl std::str::FromStr for RoomMembershipModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "friends" => Ok(Self::Friends),
            "public" => Ok(Self::Public),
            other => Err(format!("unknown membership model: {}", other)),
        }
    }
}

/// A chat room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    /// The room's message channel.
    pub channel_id: String,
    /// The user who owns the room.
    pub owner: UserInfo,
    pub membership_model: RoomMembershipModel,
    pub created_at_utc: DateTime<Utc>,
}

/// Body of a create-room request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub membership_model: RoomMembershipModel,
}

impl CreateRoomRequest {
    /// Creates a create-room request.
    pub fn new(name: impl Into<String>, membership_model: RoomMembershipModel) -> Self {
        Self {
            name: name.into(),
            membership_model,
        }
    }
}

/// Body of a room invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteUserToRoomRequest {
    pub room_id: String,
    pub user_id: String,
}

/// Body of a room invitation acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptRoomInviteRequest {
    pub room_id: String,
}

/// Body of a send-friend-request call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFriendRequestRequest {
    /// The user the request is sent to.
    pub requested_user_id: String,
}

impl SendFriendRequestRequest {
    pub fn new(requested_user_id: impl Into<String>) -> Self {
        Self {
            requested_user_id: requested_user_id.into(),
        }
    }
}

/// Body of an accept-friend-request call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptFriendRequestRequest {
    /// The user that sent the friend request.
    pub initiating_user_id: String,
}

impl AcceptFriendRequestRequest {
    pub fn new(initiating_user_id: impl Into<String>) -> Self {
        Self {
            initiating_user_id: initiating_user_id.into(),
        }
    }
}

/// Decodes a list that the server may send as `null` when empty.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

//! Core types: users, rooms, channels, messages, chat macros, tracing

pub mod macros;
pub mod model;
pub mod tracing;

pub use macros::{
    ChatMacroRequest, DiceRoll, MacroParseError, MacroRequest, MacroType, classify,
};
pub use model::{
    AcceptFriendRequestRequest, AcceptRoomInviteRequest, Channel, ChannelType, ChatMessage,
    CreateRoomRequest, InviteUserToRoomRequest, RelationshipType, Room, RoomMembershipModel,
    SendFriendRequestRequest, User, UserInfo, UserRelationship,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};

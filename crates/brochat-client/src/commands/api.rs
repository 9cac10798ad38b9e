//! Commands that call the BroChat API.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use brochat_core::{AcceptFriendRequestRequest, CreateRoomRequest, SendFriendRequestRequest};
use brochat_protocol::ChatResponse;

use crate::cli::{Command, FriendAction, RoomAction, messages_query, users_query};
use crate::client::BroChatClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::Transport;

use super::print_json;

/// Runs one API command and prints its result.
pub async fn run<T: Transport>(client: &BroChatClient<T>, command: Command) -> ClientResult<()> {
    let output = execute(client, command).await?;
    print_json(&output)
}

/// Runs one API command and returns its result as JSON.
///
/// A failure code becomes [`ClientError::Api`].
pub async fn execute<T: Transport>(
    client: &BroChatClient<T>,
    command: Command,
) -> ClientResult<Value> {
    match command {
        Command::User => content(client.get_user().await),
        Command::Users {
            exclude_self,
            exclude_friends,
            filter,
            page,
            page_size,
        } => {
            let query = users_query(exclude_self, exclude_friends, filter, page, page_size);
            content(client.get_users(&query).await)
        }
        Command::Channel { id } => content(client.get_channel(&id).await),
        Command::Messages {
            id,
            before,
            page,
            page_size,
        } => {
            let query = messages_query(before, page, page_size);
            content(client.get_channel_messages(&id, &query).await)
        }
        Command::Friend { action } => match action {
            FriendAction::Send { user_id } => no_content(
                client
                    .send_friend_request(&SendFriendRequestRequest::new(user_id))
                    .await,
            ),
            FriendAction::Accept { user_id } => no_content(
                client
                    .accept_friend_request(&AcceptFriendRequestRequest::new(user_id))
                    .await,
            ),
        },
        Command::Rooms { action } => match action {
            RoomAction::List => content(client.get_rooms().await),
            RoomAction::Create { name, membership } => content(
                client
                    .create_room(&CreateRoomRequest::new(name, membership))
                    .await,
            ),
            RoomAction::Join { id } => no_content(client.join_room(&id).await),
        },
        other => Err(ClientError::Config(format!(
            "{:?} is not an API command",
            other
        ))),
    }
}

fn content<C: Serialize>(response: ChatResponse<C>) -> ClientResult<Value> {
    let content = response.into_result()?;
    Ok(serde_json::to_value(content)?)
}

fn no_content(response: ChatResponse) -> ClientResult<Value> {
    let code = response.code();
    response.into_result()?;
    debug!(code = code.value(), "operation succeeded");
    Ok(json!({ "code": code, "message": code.describe() }))
}

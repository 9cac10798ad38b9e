//! BroChat API client.
//!
//! Every operation follows the same steps: resolve the resource path against
//! the base address, attach the query string and credentials, issue one
//! request over the [`Transport`], and fold the outcome into a
//! [`ChatResponse`]. Nothing is retried or cached.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use brochat_core::{
    AcceptFriendRequestRequest, Channel, ChatMessage, CreateRoomRequest, Room,
    SendFriendRequestRequest, User, UserInfo,
};
use brochat_protocol::{BroChatError, ChatResponse, ResponseCode};

use crate::auth::AuthInfo;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::query::{MessagesQuery, QueryParams, UsersQuery};
use crate::transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError,
    TransportErrorKind,
};

const CONTENT_TYPE_JSON: &str = "application/json";
const CHANNEL_ID: &str = ":channelId";
const ROOM_ID: &str = ":roomId";

/// A resource path with its method and expected success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Endpoint {
    method: HttpMethod,
    path: &'static str,
    status: u16,
}

impl Endpoint {
    const fn new(method: HttpMethod, path: &'static str, status: u16) -> Self {
        Self {
            method,
            path,
            status,
        }
    }

    /// Substitutes the first occurrence of `placeholder` with `value`.
    fn resolve(&self, placeholder: Option<(&str, &str)>) -> String {
        match placeholder {
            Some((name, value)) => self.path.replacen(name, value, 1),
            None => self.path.to_string(),
        }
    }
}

const GET_USER: Endpoint = Endpoint::new(HttpMethod::Get, "/api/brochat/user", 200);
const GET_USERS: Endpoint = Endpoint::new(HttpMethod::Get, "/api/brochat/users", 200);
const GET_CHANNEL: Endpoint =
    Endpoint::new(HttpMethod::Get, "/api/brochat/channels/:channelId", 200);
const GET_CHANNEL_MESSAGES: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/api/brochat/channels/:channelId/messages",
    200,
);
const SEND_FRIEND_REQUEST: Endpoint = Endpoint::new(
    HttpMethod::Put,
    "/api/brochat/friends/send-friend-request",
    204,
);
const ACCEPT_FRIEND_REQUEST: Endpoint = Endpoint::new(
    HttpMethod::Put,
    "/api/brochat/friends/accept-friend-request",
    204,
);
const GET_ROOMS: Endpoint = Endpoint::new(HttpMethod::Get, "/api/brochat/rooms", 200);
const CREATE_ROOM: Endpoint = Endpoint::new(HttpMethod::Post, "/api/brochat/rooms", 201);
const JOIN_ROOM: Endpoint = Endpoint::new(HttpMethod::Put, "/api/brochat/rooms/:roomId/join", 204);

/// Client for the BroChat REST API.
///
/// Holds no state besides its configuration, so one instance can serve
/// concurrent calls through `&self`.
#[derive(Debug, Clone)]
pub struct BroChatClient<T = ReqwestTransport> {
    transport: T,
    base_url: Url,
    auth: AuthInfo,
}

impl BroChatClient<ReqwestTransport> {
    /// Builds a client from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::from_settings(&config.server)?;
        let auth = config.auth.resolve()?;
        Ok(Self::new(transport, config.server.base_url()?, auth)?)
    }
}

impl<T: Transport> BroChatClient<T> {
    /// Creates a client for the server at `base_url`.
    ///
    /// Fails with [`ResponseCode::INVALID_HOST_ADDRESS`] unless the address
    /// is an absolute `http` or `https` URL with a host.
    pub fn new(transport: T, base_url: &str, auth: AuthInfo) -> Result<Self, BroChatError> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            BroChatError::new(
                ResponseCode::INVALID_HOST_ADDRESS,
                [format!("invalid host address {:?}: {}", base_url, e)],
            )
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || !base_url.has_host() {
            return Err(BroChatError::new(
                ResponseCode::INVALID_HOST_ADDRESS,
                [format!("invalid host address {:?}", base_url.as_str())],
            ));
        }

        // Resource paths are joined relative to the base path.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            transport,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Gets the calling user's profile.
    pub async fn get_user(&self) -> ChatResponse<User> {
        self.fetch(&GET_USER, None, QueryParams::new(), None).await
    }

    /// Lists users.
    pub async fn get_users(&self, query: &UsersQuery) -> ChatResponse<Vec<UserInfo>> {
        self.fetch_list(&GET_USERS, None, query.to_params()).await
    }

    /// Gets a channel.
    pub async fn get_channel(&self, channel_id: &str) -> ChatResponse<Channel> {
        self.fetch(
            &GET_CHANNEL,
            Some((CHANNEL_ID, channel_id)),
            QueryParams::new(),
            None,
        )
        .await
    }

    /// Lists a channel's messages.
    pub async fn get_channel_messages(
        &self,
        channel_id: &str,
        query: &MessagesQuery,
    ) -> ChatResponse<Vec<ChatMessage>> {
        self.fetch_list(
            &GET_CHANNEL_MESSAGES,
            Some((CHANNEL_ID, channel_id)),
            query.to_params(),
        )
        .await
    }

    /// Sends a friend request.
    pub async fn send_friend_request(&self, request: &SendFriendRequestRequest) -> ChatResponse {
        let body = match encode_body(request) {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.submit(&SEND_FRIEND_REQUEST, None, Some(body)).await
    }

    /// Accepts a friend request.
    pub async fn accept_friend_request(
        &self,
        request: &AcceptFriendRequestRequest,
    ) -> ChatResponse {
        let body = match encode_body(request) {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.submit(&ACCEPT_FRIEND_REQUEST, None, Some(body)).await
    }

    /// Lists the rooms visible to the calling user.
    pub async fn get_rooms(&self) -> ChatResponse<Vec<Room>> {
        self.fetch_list(&GET_ROOMS, None, QueryParams::new()).await
    }

    /// Creates a room.
    pub async fn create_room(&self, request: &CreateRoomRequest) -> ChatResponse<Room> {
        let body = match encode_body(request) {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.fetch(&CREATE_ROOM, None, QueryParams::new(), Some(body))
            .await
    }

    /// Joins a room.
    pub async fn join_room(&self, room_id: &str) -> ChatResponse {
        self.submit(&JOIN_ROOM, Some((ROOM_ID, room_id)), None).await
    }

    /// Runs a content-bearing operation.
    async fn fetch<C: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        placeholder: Option<(&str, &str)>,
        query: QueryParams,
        body: Option<Vec<u8>>,
    ) -> ChatResponse<C> {
        let response = match self.round_trip(endpoint, placeholder, query, body).await {
            Ok(response) => response,
            Err(err) => return err.into(),
        };

        match serde_json::from_slice::<C>(&response.body) {
            Ok(content) => ChatResponse::success(content),
            Err(e) => {
                warn!(path = endpoint.path, error = %e, "undecodable response body");
                ChatResponse::failure(
                    ResponseCode::UNEXPECTED_RESPONSE,
                    [format!("failed to decode response body: {}", e)],
                )
            }
        }
    }

    /// Runs a listing operation. A `null` body is an empty list.
    async fn fetch_list<C: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        placeholder: Option<(&str, &str)>,
        query: QueryParams,
    ) -> ChatResponse<Vec<C>> {
        self.fetch::<Option<Vec<C>>>(endpoint, placeholder, query, None)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Runs an operation that returns no content.
    async fn submit(
        &self,
        endpoint: &Endpoint,
        placeholder: Option<(&str, &str)>,
        body: Option<Vec<u8>>,
    ) -> ChatResponse {
        match self
            .round_trip(endpoint, placeholder, QueryParams::new(), body)
            .await
        {
            Ok(_) => ChatResponse::from_code(ResponseCode::SUCCESS_NO_CONTENT),
            Err(err) => err.into(),
        }
    }

    /// Sends one request and checks the status.
    async fn round_trip(
        &self,
        endpoint: &Endpoint,
        placeholder: Option<(&str, &str)>,
        query: QueryParams,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, BroChatError> {
        let request = self.build_request(endpoint, placeholder, &query, body)?;
        debug!(method = %request.method, url = %request.url, "brochat request");

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(transport_failure)?;

        debug!(status = response.status, path = endpoint.path, "brochat response");
        if response.status == endpoint.status {
            return Ok(response);
        }

        let err = status_failure(&response);
        warn!(
            status = response.status,
            code = err.code.value(),
            path = endpoint.path,
            "brochat request failed"
        );
        Err(err)
    }

    fn build_request(
        &self,
        endpoint: &Endpoint,
        placeholder: Option<(&str, &str)>,
        query: &QueryParams,
        body: Option<Vec<u8>>,
    ) -> Result<HttpRequest, BroChatError> {
        let path = endpoint.resolve(placeholder);
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                BroChatError::new(
                    ResponseCode::REQUEST_FORMATTING,
                    [format!("cannot build URL for {:?}: {}", path, e)],
                )
            })?;
        query.apply(&mut url);

        let mut headers = vec![("Authorization".to_string(), self.auth.header_value())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()));
        }

        Ok(HttpRequest {
            method: endpoint.method,
            url,
            headers,
            body,
        })
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<Vec<u8>, BroChatError> {
    serde_json::to_vec(body).map_err(|e| {
        BroChatError::new(
            ResponseCode::REQUEST_FORMATTING,
            [format!("failed to serialize request body: {}", e)],
        )
    })
}

fn transport_failure(err: TransportError) -> BroChatError {
    let code = match err.kind {
        TransportErrorKind::Timeout => ResponseCode::CONNECTION_TIMEOUT,
        TransportErrorKind::Connection => ResponseCode::CONNECTION,
        TransportErrorKind::Request => ResponseCode::REQUEST,
    };
    warn!(code = code.value(), error = %err, "transport failure");
    BroChatError::new(code, [err.message])
}

/// Maps an unexpected status to an error.
///
/// A server error body is passed through as sent; a missing or unusable
/// body falls back to the status code.
fn status_failure(response: &HttpResponse) -> BroChatError {
    match serde_json::from_slice::<BroChatError>(&response.body) {
        Ok(err) if err.code.is_failure() => err,
        _ => BroChatError::new(
            ResponseCode::from_http_status(response.status),
            [format!("server responded with status {}", response.status)],
        ),
    }
}

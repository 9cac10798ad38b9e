//! HTTP client operations, configuration and the brochat CLI.
//!
//! [`BroChatClient`] wraps the BroChat REST API. Each operation returns a
//! [`ChatResponse`](brochat_protocol::ChatResponse) whose code says whether
//! the call succeeded; transport, status and decoding failures all fold into
//! that code.

pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod query;
pub mod secret;
pub mod transport;

pub use auth::AuthInfo;
pub use cli::Cli;
pub use client::BroChatClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use query::{MessagesQuery, QueryParams, UsersQuery};
pub use transport::{
    BoxFuture, HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport,
    TransportError, TransportErrorKind,
};

//! HTTP transport seam.
//!
//! The client operation layer only needs "send one request, get a status
//! and a body back". [`Transport`] is that contract; [`ReqwestTransport`]
//! is the production implementation. Connect and read timeouts belong to
//! the transport, not to the client.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::trace;
use url::Url;

use crate::config::ServerSettings;
use crate::error::{ClientError, ClientResult};

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// HTTP methods used by the BroChat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Returns the first header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// How a request failed before a response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The connect or read timeout elapsed.
    Timeout,
    /// Connection refused, DNS failure, TLS or other I/O failure.
    Connection,
    /// The transport rejected the request before sending it.
    Request,
}

/// A transport-level failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connection, message)
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Request, message)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("request timeout: {}", err))
        } else if err.is_connect() {
            Self::connection(format!("connection failed: {}", err))
        } else if err.is_builder() {
            Self::request(format!("invalid request: {}", err))
        } else {
            Self::connection(format!("request failed: {}", err))
        }
    }
}

/// Sends HTTP requests.
///
/// Implementations must be shareable across tasks; the client issues
/// concurrent requests through a shared reference.
pub trait Transport: Send + Sync {
    /// Sends one request and returns the response status and body.
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        (**self).execute(request)
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given timeouts.
    pub fn new(
        timeout: Duration,
        connect_timeout: Duration,
        user_agent: &str,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ClientError::Http(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Creates a transport from the `[server]` config section.
    pub fn from_settings(settings: &ServerSettings) -> ClientResult<Self> {
        Self::new(
            Duration::from_secs(settings.timeout),
            Duration::from_secs(settings.connect_timeout),
            &settings.user_agent(),
        )
    }

    /// Wraps an existing `reqwest` client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        trace!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        trace!(status, bytes = body.len(), "received response");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(self.send(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("https://chat.example.com/api").unwrap(),
            headers: vec![("Authorization".to_string(), "Bearer abc".to_string())],
            body: None,
        };
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
        assert_eq!(request.header("content-type"), None);
    }

    #[test]
    fn transport_error_kinds() {
        assert_eq!(
            TransportError::timeout("slow").kind,
            TransportErrorKind::Timeout
        );
        assert_eq!(
            TransportError::connection("refused").to_string(),
            "refused"
        );
    }

    #[test]
    fn reqwest_transport_builds_from_settings() {
        let settings = ServerSettings::default();
        assert!(ReqwestTransport::from_settings(&settings).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_connection_failure() {
        let transport = ReqwestTransport::new(
            Duration::from_secs(2),
            Duration::from_secs(1),
            "brochat-test",
        )
        .unwrap();
        // Nothing listens on the discard port.
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("http://127.0.0.1:9/api/brochat/user").unwrap(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(request).await.unwrap_err();
        assert_ne!(err.kind, TransportErrorKind::Request);
    }
}

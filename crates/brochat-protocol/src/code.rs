//! Response codes.
//!
//! A response code is one unsigned byte split into three disjoint ranges:
//!
//! ```text
//!   0 ..=  63   server-side failures
//!  64 ..= 127   client-side / transport failures
//! 128 ..= 255   success
//! ```
//!
//! Every success code is greater than every failure code, so
//! `code >= 128` is the whole success test. Codes are persisted and logged
//! numerically by clients: new codes are only ever appended at the end of
//! their range and existing values are never renumbered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest code of the server failure range.
pub const SERVER_FAILURE_MAX: u8 = 63;

/// Highest code of the client failure range, and of failures overall.
pub const CLIENT_FAILURE_MAX: u8 = 127;

/// Lowest success code.
pub const SUCCESS_THRESHOLD: u8 = 128;

/// Range a response code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeRange {
    /// The server rejected or failed the request.
    Server,
    /// The request never produced a usable server answer.
    Client,
    Success,
}

/// A numeric response code.
///
/// Unknown values are representable so that codes from a newer server pass
/// through untouched; [`ResponseCode::describe`] falls back to
/// `"unknown error"` for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCode(u8);

impl ResponseCode {
    // Server failures (0..=63).

    /// Unhandled server error.
    pub const UNHANDLED: Self = Self(0);
    pub const FORBIDDEN: Self = Self(1);
    /// The request failed validation.
    pub const VALIDATION: Self = Self(2);
    /// The server could not parse the request.
    pub const PARSE: Self = Self(3);
    pub const NOT_FOUND: Self = Self(4);
    pub const CONFLICT: Self = Self(5);
    /// The operation is not valid in the resource's current state.
    pub const INVALID_OPERATION: Self = Self(6);
    pub const UNAUTHORIZED: Self = Self(7);

    // Client failures (64..=127).

    /// The base address could not be parsed.
    pub const INVALID_HOST_ADDRESS: Self = Self(64);
    /// The request could not be built (path or body).
    pub const REQUEST_FORMATTING: Self = Self(65);
    pub const CONNECTION_TIMEOUT: Self = Self(66);
    /// Connection refused, DNS failure or other I/O error.
    pub const CONNECTION: Self = Self(67);
    /// The response body did not have the expected shape.
    pub const UNEXPECTED_RESPONSE: Self = Self(68);
    /// Any other failure reported by the transport.
    pub const REQUEST: Self = Self(69);

    // Success (128..).

    pub const SUCCESS: Self = Self(128);
    pub const SUCCESS_NO_CONTENT: Self = Self(129);

    /// Every code with a defined meaning, in numeric order.
    pub const KNOWN: [Self; 16] = [
        Self::UNHANDLED,
        Self::FORBIDDEN,
        Self::VALIDATION,
        Self::PARSE,
        Self::NOT_FOUND,
        Self::CONFLICT,
        Self::INVALID_OPERATION,
        Self::UNAUTHORIZED,
        Self::INVALID_HOST_ADDRESS,
        Self::REQUEST_FORMATTING,
        Self::CONNECTION_TIMEOUT,
        Self::CONNECTION,
        Self::UNEXPECTED_RESPONSE,
        Self::REQUEST,
        Self::SUCCESS,
        Self::SUCCESS_NO_CONTENT,
    ];

    /// Wraps a raw code.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw code.
    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_failure(self) -> bool {
        self.0 < SUCCESS_THRESHOLD
    }

    pub const fn is_success(self) -> bool {
        !self.is_failure()
    }

    pub const fn range(self) -> CodeRange {
        if self.0 <= SERVER_FAILURE_MAX {
            CodeRange::Server
        } else if self.0 <= CLIENT_FAILURE_MAX {
            CodeRange::Client
        } else {
            CodeRange::Success
        }
    }

    /// Returns true if the code has a defined meaning in this version.
    pub fn is_known(self) -> bool {
        Self::KNOWN.contains(&self)
    }

    /// Returns a human-readable message for the code.
    pub fn describe(self) -> &'static str {
        match self {
            Self::UNHANDLED => "an unhandled error occurred on the server",
            Self::FORBIDDEN => "forbidden",
            Self::VALIDATION => "the request failed validation",
            Self::PARSE => "the server could not parse the request",
            Self::NOT_FOUND => "resource not found",
            Self::CONFLICT => "the request conflicts with the current state of the resource",
            Self::INVALID_OPERATION => "the operation is not valid",
            Self::UNAUTHORIZED => "unauthorized",
            Self::INVALID_HOST_ADDRESS => "invalid host address",
            Self::REQUEST_FORMATTING => "the request could not be formatted",
            Self::CONNECTION_TIMEOUT => "the connection timed out",
            Self::CONNECTION => "could not connect to the server",
            Self::UNEXPECTED_RESPONSE => "the server returned an unexpected response",
            Self::REQUEST => "the request failed",
            Self::SUCCESS => "success",
            Self::SUCCESS_NO_CONTENT => "success (no content)",
            _ => "unknown error",
        }
    }

    /// Maps an unexpected HTTP status to a server failure code.
    ///
    /// Used when an error status arrives without a decodable error body.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::VALIDATION,
            401 => Self::UNAUTHORIZED,
            403 => Self::FORBIDDEN,
            404 => Self::NOT_FOUND,
            _ => Self::UNHANDLED,
        }
    }
}

impl From<u8> for ResponseCode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<ResponseCode> for u8 {
    fn from(code: ResponseCode) -> Self {
        code.0
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.describe(), self.0)
    }
}

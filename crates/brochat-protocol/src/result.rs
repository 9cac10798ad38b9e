//! Operation results.
//!
//! Every client operation produces exactly one [`ChatResponse`]: a response
//! code, the error details attached to it, and for content-bearing
//! operations the decoded content. The content is only reachable when the
//! code is a success code, so callers cannot mistake an empty placeholder
//! for a real (if empty) payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::ResponseCode;

/// A BroChat error: a failure code plus human-readable details.
///
/// This is also the JSON body the server sends with a failure status:
///
/// ```json
/// {"code": 4, "details": ["user not found"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroChatError {
    /// The response code.
    pub code: ResponseCode,
    /// Details explaining the failure.
    pub details: Vec<String>,
}

impl BroChatError {
    /// Creates an error with the given code and details.
    pub fn new<I, S>(code: ResponseCode, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            details: details.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an unhandled server error.
    pub fn unhandled() -> Self {
        Self::new(ResponseCode::UNHANDLED, ["an unhandled/unexpected error occurred"])
    }

    /// Returns the message for the code.
    pub fn message(&self) -> &'static str {
        self.code.describe()
    }
}

impl fmt::Display for BroChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;
        if !self.details.is_empty() {
            write!(f, ": {}", self.details.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for BroChatError {}

/// The outcome of one client operation.
///
/// Built once per call and never modified. The default type parameter is
/// used by operations that return no content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ChatResponse<T = ()> {
    code: ResponseCode,
    details: Vec<String>,
    content: Option<T>,
}

impl ChatResponse<()> {
    /// Creates a result without content.
    ///
    /// A success code yields `Some(())` content so that
    /// [`ChatResponse::into_result`] reports `Ok(())`.
    pub fn new<I, S>(code: ResponseCode, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(code, Some(()), details)
    }

    /// Creates a result carrying only a code.
    pub fn from_code(code: ResponseCode) -> Self {
        Self::new(code, std::iter::empty::<String>())
    }
}

impl<T> ChatResponse<T> {
    fn build<I, S>(code: ResponseCode, content: Option<T>, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            details: details.into_iter().map(Into::into).collect(),
            // Content never survives on a failure code.
            content: if code.is_success() { content } else { None },
        }
    }

    /// Creates a content-bearing result.
    ///
    /// The content is dropped if `code` is a failure code.
    pub fn with_content<I, S>(code: ResponseCode, content: T, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(code, Some(content), details)
    }

    /// Creates a successful result with content.
    pub fn success(content: T) -> Self {
        Self::with_content(ResponseCode::SUCCESS, content, std::iter::empty::<String>())
    }

    /// Creates a failed result.
    pub fn failure<I, S>(code: ResponseCode, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(code, None, details)
    }

    /// Creates a failed result from an error value.
    pub fn from_error(error: BroChatError) -> Self {
        Self {
            code: error.code,
            details: error.details,
            content: None,
        }
    }

    pub fn code(&self) -> ResponseCode {
        self.code
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn is_failure(&self) -> bool {
        self.code.is_failure()
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns the error for a failure code, or `None` on success.
    pub fn error(&self) -> Option<BroChatError> {
        self.is_failure().then(|| BroChatError {
            code: self.code,
            details: self.details.clone(),
        })
    }

    /// Returns the content; always `None` for failure codes.
    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn into_content(self) -> Option<T> {
        self.content
    }

    /// Converts into a standard `Result`.
    ///
    /// A success code without content (a no-content operation called through
    /// a content type) is reported as an unexpected response.
    pub fn into_result(self) -> Result<T, BroChatError> {
        if self.is_failure() {
            return Err(BroChatError {
                code: self.code,
                details: self.details,
            });
        }
        self.content.ok_or_else(|| {
            BroChatError::new(
                ResponseCode::UNEXPECTED_RESPONSE,
                ["success response carried no content"],
            )
        })
    }

    /// Maps the content, keeping code and details.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ChatResponse<U> {
        ChatResponse {
            code: self.code,
            details: self.details,
            content: self.content.map(f),
        }
    }
}

impl<T> From<BroChatError> for ChatResponse<T> {
    fn from(error: BroChatError) -> Self {
        Self::from_error(error)
    }
}

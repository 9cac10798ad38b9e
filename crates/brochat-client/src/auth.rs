//! Access credentials.

use std::fmt;

/// Default token type for the Authorization header.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Token type and access token sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthInfo {
    pub token_type: String,
    pub access_token: String,
}

impl AuthInfo {
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
        }
    }

    /// Bearer credentials for the given token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new(DEFAULT_TOKEN_TYPE, access_token)
    }

    /// Value of the `Authorization` header: `<TokenType> <AccessToken>`.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInfo")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_value_joins_type_and_token() {
        assert_eq!(AuthInfo::bearer("abc").header_value(), "Bearer abc");
        assert_eq!(AuthInfo::new("Token", "xyz").header_value(), "Token xyz");
    }

    #[test]
    fn debug_hides_token() {
        let debug = format!("{:?}", AuthInfo::bearer("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Bearer"));
    }
}

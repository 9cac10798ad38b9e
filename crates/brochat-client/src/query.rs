//! Query string options.
//!
//! Each listing operation takes an immutable option value. Unset options
//! are omitted from the request, and an option set to an empty string is
//! dropped as well: an empty parameter can never be forced onto the wire.
//!
//! Page sizes are sent as given. The server caps them (currently at 100).

use url::Url;

/// Ordered query parameters with empty keys and values filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter unless its key or value is empty.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        if key.is_empty() || value.is_empty() {
            return;
        }
        self.pairs.push((key, value));
    }

    /// Adds a parameter if the value is set.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Appends the parameters to the URL's query string.
    pub fn apply(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(self.pairs.iter());
    }
}

/// Filters and paging for the users listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersQuery {
    /// Leave the calling user out of the listing.
    pub exclude_self: Option<bool>,
    /// Leave the calling user's friends out of the listing.
    pub exclude_friends: Option<bool>,
    /// Only users whose username matches.
    pub username_filter: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl UsersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set exclude_self.
    pub fn exclude_self(mut self, exclude: bool) -> Self {
        self.exclude_self = Some(exclude);
        self
    }

    /// Builder: set exclude_friends.
    pub fn exclude_friends(mut self, exclude: bool) -> Self {
        self.exclude_friends = Some(exclude);
        self
    }

    /// Builder: set the username filter.
    pub fn username_filter(mut self, filter: impl Into<String>) -> Self {
        self.username_filter = Some(filter.into());
        self
    }

    /// Builder: set the page to start from.
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Builder: set the page size.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("exclude-self", self.exclude_self);
        params.push_opt("exclude-friends", self.exclude_friends);
        params.push_opt("username-filter", self.username_filter.as_deref());
        params.push_opt("page", self.page);
        params.push_opt("page-size", self.page_size);
        params
    }
}

/// Paging for channel messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagesQuery {
    /// Only messages sent before this message ID.
    pub before_message: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl MessagesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: fetch messages before the given message ID.
    pub fn before_message(mut self, message_id: impl Into<String>) -> Self {
        self.before_message = Some(message_id.into());
        self
    }

    /// Builder: set the page to start from.
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Builder: set the page size.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("before-msg", self.before_message.as_deref());
        params.push_opt("page", self.page);
        params.push_opt("page-size", self.page_size);
        params
    }
}

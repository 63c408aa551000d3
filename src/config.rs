#![cfg(feature = "std")]

use std::string::String;
use std::time::Duration;

/// Public lobby server used when none is given.
pub const DEFAULT_SERVER_URL: &str = "https://five-in-a-row-ahwe.onrender.com";

/// Default timeout for a single HTTP request (10 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the lobby routes are mounted on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVariant {
    /// Routes at the server root, e.g. `/game-state/{id}`.
    #[default]
    Root,
    /// Routes under `/api`, e.g. `/api/game-state/{id}`.
    Prefixed,
}

impl ApiVariant {
    pub fn prefix(self) -> &'static str {
        match self {
            ApiVariant::Root => "",
            ApiVariant::Prefixed => "/api",
        }
    }
}

/// Connection settings for a lobby server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub api: ApiVariant,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api: ApiVariant::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>, api: ApiVariant) -> Self {
        Self {
            server_url: server_url.into(),
            api,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Base URL every route is appended to, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), self.api.prefix())
    }

    /// Full URL of `route` (given without a leading slash).
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url(), route.trim_start_matches('/'))
    }
}

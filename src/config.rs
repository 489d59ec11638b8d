//! Configuration options for the GHG client

use std::path::PathBuf;
use std::time::Duration;

/// Configuration options for the GHG client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether to persist the session token across restarts
    pub persist_session: bool,

    /// Where the persisted token lives on disk; in-memory storage when unset
    pub token_path: Option<PathBuf>,

    /// Per-request timeout, applied at the transport. No additional timeout
    /// policy exists above this layer.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            token_path: None,
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ClientOptions {
    /// Set whether to persist the session token
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the file the persisted token is stored in
    pub fn with_token_path<P: Into<PathBuf>>(mut self, value: P) -> Self {
        self.token_path = Some(value.into());
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}

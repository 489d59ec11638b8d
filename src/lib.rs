//! GHG Emissions API Client
//!
//! A Rust client for a greenhouse-gas accounting service: authentication and
//! session management, typed wrappers over the REST endpoints, navigation
//! gating, and client-side export of generated reports to CSV and PDF.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod guard;
pub mod session;
pub mod storage;
pub mod types;

use std::sync::Arc;

use reqwest::Client;

use crate::api::EmissionsApi;
use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::fetch::ApiClient;
use crate::guard::RouteGuard;
use crate::session::SessionStore;
use crate::storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};

/// The main entry point for the GHG client
pub struct GhgClient {
    /// The base URL of the API
    pub base_url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    session: Arc<SessionStore>,
    api: ApiClient,
    auth: Auth,
}

impl GhgClient {
    /// Create a new client with default options
    ///
    /// # Example
    ///
    /// ```
    /// use ghg_client::GhgClient;
    ///
    /// let client = GhgClient::new("https://ghg.example.com");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use ghg_client::{config::ClientOptions, GhgClient};
    ///
    /// let options = ClientOptions::default().with_token_path("/var/lib/ghg/token");
    /// let client = GhgClient::new_with_options("https://ghg.example.com", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let storage: Box<dyn TokenStorage> = match (options.persist_session, &options.token_path) {
            (true, Some(path)) => Box::new(FileTokenStorage::new(path)),
            _ => Box::new(MemoryTokenStorage::new()),
        };
        // The one initialization point: persisted state is read here, before
        // any consumer can ask about authentication.
        let session = Arc::new(SessionStore::init(storage));

        let http_client = Client::new();
        let api = ApiClient::new(
            base_url,
            http_client.clone(),
            session.clone(),
            options.request_timeout,
        );
        let auth = Auth::new(api.clone(), session.clone());

        Self {
            base_url: base_url.to_string(),
            http_client,
            options,
            session,
            api,
            auth,
        }
    }

    /// The auth client for login, registration and logout
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// The underlying authenticated HTTP client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Typed wrappers for the factor, input, dashboard and report endpoints
    pub fn emissions(&self) -> EmissionsApi {
        EmissionsApi::new(self.api.clone())
    }

    /// A handle to the process-wide session store
    pub fn session(&self) -> Arc<SessionStore> {
        self.session.clone()
    }

    /// A route guard over this client's session store
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.session.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::AuthOutcome;
    pub use crate::config::ClientOptions;
    pub use crate::error::{ApiError, Error};
    pub use crate::guard::Route;
    pub use crate::GhgClient;
}

//! Login, registration and logout against the auth endpoints

use std::sync::Arc;

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::Error;
use crate::fetch::ApiClient;
use crate::session::SessionStore;
use crate::types::User;

/// Success shape shared by both auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// The opaque session token
    pub auth_token: String,

    /// The authenticated user's profile
    #[serde(default)]
    pub user: Option<User>,
}

/// Outcome of a login or registration attempt.
///
/// Failures are data here, not errors: callers that only care about the
/// boolean use [`AuthOutcome::is_signed_in`], callers presenting feedback can
/// inspect the rejection status and server message.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// Credentials accepted; the session store now holds the token
    SignedIn {
        /// Profile from the response, when the server included one
        user: Option<User>,
    },

    /// The server refused the attempt (bad credentials, duplicate account, ...)
    Rejected {
        /// HTTP status of the refusal
        status: u16,
        /// Server message, when one was provided
        message: Option<String>,
    },

    /// The request never completed (network failure, timeout)
    Unreachable,
}

impl AuthOutcome {
    /// Whether the attempt left an authenticated session behind
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthOutcome::SignedIn { .. })
    }
}

/// Auth client
pub struct Auth {
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl Auth {
    /// Create a new auth client
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Exchange email and password for a session token
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let payload = json!({
            "email": email,
            "password": password,
        });

        self.authenticate("/auth/login", &payload).await
    }

    /// Create an account; the server signs the new user straight in
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        company_name: &str,
    ) -> AuthOutcome {
        let payload = json!({
            "username": username,
            "email": email,
            "password": password,
            "company_name": company_name,
        });

        self.authenticate("/auth/register", &payload).await
    }

    /// Drop the session. Tokens are not invalidated server-side, so no
    /// network call is involved.
    pub fn logout(&self) {
        self.session.clear_session();
    }

    async fn authenticate(&self, path: &str, payload: &serde_json::Value) -> AuthOutcome {
        let request = match self.api.post(path).json(payload) {
            Ok(request) => request,
            Err(_) => return AuthOutcome::Unreachable,
        };

        match request.send_json::<AuthResponse>().await {
            Ok(response) => {
                // The store mutation happens after the response resolves and
                // before the outcome is returned, so the route guard never
                // observes a half-updated session.
                self.session
                    .set_session(&response.auth_token, response.user.clone());
                debug!("authenticated via {}", path);
                AuthOutcome::SignedIn {
                    user: response.user,
                }
            }
            Err(Error::Api(err)) => {
                debug!("auth attempt via {} rejected: {}", path, err);
                let message = if err.message.is_empty() {
                    None
                } else {
                    Some(err.message)
                };
                AuthOutcome::Rejected {
                    status: err.status,
                    message,
                }
            }
            Err(err) => {
                debug!("auth attempt via {} failed: {}", path, err);
                AuthOutcome::Unreachable
            }
        }
    }
}

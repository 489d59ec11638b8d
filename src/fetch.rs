//! Authenticated HTTP layer over the GHG API
//!
//! Every request picks up the bearer token from the session store at send
//! time. A 401 response clears the session and fires the registered
//! unauthorized hook before the error is handed back to the caller.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{ApiError, Error};
use crate::session::SessionStore;

type UnauthorizedHook = Box<dyn Fn() + Send + Sync>;

/// HTTP client for the GHG API
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
    request_timeout: Option<Duration>,
    unauthorized_hook: Arc<RwLock<Option<UnauthorizedHook>>>,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(
        base_url: &str,
        http: Client,
        session: Arc<SessionStore>,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
            request_timeout,
            unauthorized_hook: Arc::new(RwLock::new(None)),
        }
    }

    /// Register the navigation signal fired when the server rejects the
    /// session with a 401. The invoking layer typically redirects to the
    /// login screen here.
    pub fn on_unauthorized<F>(&self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut guard = self.unauthorized_hook.write().unwrap();
        *guard = Some(Box::new(hook));
    }

    /// The session store this client reads its token from
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Start building a GET request
    pub fn get(&self, path: &str) -> ApiRequest<'_> {
        self.request(Method::GET, path)
    }

    /// Start building a POST request
    pub fn post(&self, path: &str) -> ApiRequest<'_> {
        self.request(Method::POST, path)
    }

    /// Start building a request with an arbitrary method
    pub fn request(&self, method: Method, path: &str) -> ApiRequest<'_> {
        ApiRequest {
            client: self,
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    fn handle_unauthorized(&self) {
        warn!("session rejected by server, clearing stored token");
        self.session.clear_session();

        let guard = self.unauthorized_hook.read().unwrap();
        if let Some(hook) = guard.as_ref() {
            hook();
        }
    }
}

/// A single request under construction
pub struct ApiRequest<'a> {
    client: &'a ApiClient,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ApiRequest<'_> {
    /// Append a query parameter
    pub fn query<V: ToString>(mut self, key: &str, value: V) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Execute the request, returning the raw successful response.
    ///
    /// Every failure status becomes an [`ApiError`]; 401 additionally clears
    /// the session and fires the unauthorized hook before the error is
    /// returned. Requests are never retried at this layer: report generation
    /// and activity submission are not idempotent.
    pub async fn send(self) -> Result<reqwest::Response, Error> {
        let mut url = Url::parse(&format!("{}{}", self.client.base_url, self.path))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = self
            .client
            .http
            .request(self.method.clone(), url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(timeout) = self.client.request_timeout {
            request = request.timeout(timeout);
        }

        // The bearer token is attached iff the session currently holds one
        if let Some(token) = self.client.session.token() {
            request = request.bearer_auth(token);
        }

        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("{} {} -> {}", self.method, self.path, status);

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.client.handle_unauthorized();
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError {
            status: status.as_u16(),
            message: error_message(&body),
        }
        .into())
    }

    /// Execute the request and deserialize the JSON response body
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        let response = self.send().await?;
        Ok(response.json::<T>().await?)
    }
}

/// Pull the server's `message` field out of an error body, falling back to
/// the raw text
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    if body.is_empty() {
        "request failed".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_the_message_field() {
        let body = r#"{"message": "Invalid email or password."}"#;
        assert_eq!(error_message(body), "Invalid email or password.");
    }

    #[test]
    fn error_message_falls_back_to_raw_text() {
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(error_message(""), "request failed");
        assert_eq!(error_message(r#"{"error": "nope"}"#), r#"{"error": "nope"}"#);
    }
}

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ApiError, ChatClientError, Result};
use crate::types::{ChatRequest, ChatResponse};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Header carrying the organization identifier
pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// Typed client for the chat completions endpoint
///
/// Configuration is fixed once the builder methods have run; `chat` takes
/// `&self`, so one client can be cloned or shared across tasks.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: Option<Url>,
    api_key: SecretString,
    organization: Option<String>,
}

impl ChatClient {
    /// Create a client with the given API key
    ///
    /// The key is not validated locally; an invalid key surfaces as an
    /// [`ApiError`] from the service.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            api_key: SecretString::from(api_key.into()),
            organization: None,
        }
    }

    /// Set the organization identifier sent with every request
    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Use a custom HTTP client (timeouts, proxies, TLS settings)
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Target an OpenAI-compatible service at another base URL
    ///
    /// `/chat/completions` is appended to the path of `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Configured organization identifier
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Configured base URL override
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Send a chat completion request
    ///
    /// Performs exactly one HTTP exchange. A `200` response is decoded as
    /// [`ChatResponse`]; any other status is decoded as [`ApiError`] when
    /// the body has the expected error shape, and reported as
    /// [`ChatClientError::UnexpectedStatus`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or sent, the service
    /// rejects it, or the response cannot be decoded
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = serde_json::to_vec(request).map_err(ChatClientError::Serialization)?;
        let http_request = self.build_request(body)?;

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            url = %http_request.url(),
            "sending chat completion request"
        );

        let response = self
            .http
            .execute(http_request)
            .await
            .map_err(ChatClientError::Transport)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "chat completion response received");

        if status != StatusCode::OK {
            let body = response.bytes().await.ok();
            return Err(decode_error(status, body.as_deref()));
        }

        let body = response.bytes().await.map_err(ChatClientError::Transport)?;
        serde_json::from_slice(&body).map_err(ChatClientError::Decode)
    }

    /// Build the authenticated POST for the chat completions endpoint
    fn build_request(&self, body: Vec<u8>) -> Result<reqwest::Request> {
        let url = self.completions_url()?;

        let mut builder = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(self.api_key.expose_secret())
            .body(body);

        if let Some(organization) = self.organization.as_deref().filter(|o| !o.is_empty()) {
            builder = builder.header(ORGANIZATION_HEADER, organization);
        }

        builder
            .build()
            .map_err(|e| ChatClientError::TransportSetup(e.to_string()))
    }

    /// Resolve `<base_url>/chat/completions`
    fn completions_url(&self) -> Result<Url> {
        let mut url = match &self.base_url {
            Some(base_url) => base_url.clone(),
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| ChatClientError::TransportSetup(format!("invalid base URL: {e}")))?,
        };

        url.path_segments_mut()
            .map_err(|()| {
                ChatClientError::TransportSetup(format!("base URL cannot carry a path: {}", self.describe_base()))
            })?
            .pop_if_empty()
            .extend(["chat", "completions"]);

        Ok(url)
    }

    fn describe_base(&self) -> &str {
        self.base_url.as_ref().map_or(DEFAULT_BASE_URL, Url::as_str)
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.describe_base())
            .field("organization", &self.organization)
            .finish_non_exhaustive()
    }
}

/// Turn a non-200 response into an error
///
/// Tries the structured error shape first and falls back to the bare
/// status when the body is missing or has any other shape.
fn decode_error(status: StatusCode, body: Option<&[u8]>) -> ChatClientError {
    match body.and_then(|b| serde_json::from_slice::<ApiError>(b).ok()) {
        Some(mut error) => {
            error.status_code = status.as_u16();
            ChatClientError::Api(error)
        }
        None => ChatClientError::UnexpectedStatus {
            status: status.as_u16(),
        },
    }
}

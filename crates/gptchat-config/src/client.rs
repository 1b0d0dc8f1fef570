use std::time::Duration;

use gptchat_client::ChatClient;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Credentials and transport settings for the chat client
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// API key sent as a bearer token
    pub api_key: SecretString,
    /// Organization identifier
    #[serde(default)]
    pub organization: Option<String>,
    /// Base URL override for OpenAI-compatible services
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Total request timeout (e.g. "60s", "2m")
    #[serde(default)]
    pub timeout: Option<String>,
    /// Connection timeout (e.g. "5s")
    #[serde(default)]
    pub connect_timeout: Option<String>,
}

impl ClientConfig {
    /// Parsed total request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is invalid
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout.as_deref().map(parse_duration).transpose()
    }

    /// Parsed connection timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is invalid
    pub fn connect_timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.connect_timeout.as_deref().map(parse_duration).transpose()
    }

    /// Build a chat client from this configuration
    ///
    /// Timeouts are applied to the underlying HTTP client; the chat client
    /// itself has no timeout of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is invalid or the HTTP client cannot be built
    pub fn build_client(&self) -> anyhow::Result<ChatClient> {
        let mut http = reqwest::Client::builder();

        if let Some(timeout) = self.timeout()? {
            http = http.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout()? {
            http = http.connect_timeout(timeout);
        }

        let http = http
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        let mut client = ChatClient::new(self.api_key.expose_secret()).with_http_client(http);

        if let Some(organization) = &self.organization {
            client = client.with_organization(organization.clone());
        }
        if let Some(base_url) = &self.base_url {
            client = client.with_base_url(base_url.clone());
        }

        tracing::debug!(
            base_url = ?self.base_url.as_ref().map(Url::as_str),
            organization = self.organization.is_some(),
            "chat client configured"
        );

        Ok(client)
    }
}

fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid duration '{s}': {e}"))
}

use gptchat_client::{ChatRequest, models};
use serde::Deserialize;

/// Defaults filled into requests that leave a field unset
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Model used when the caller does not pick one
    #[serde(default = "default_model")]
    pub model: String,
    /// System prompt placed before the conversation
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub presence_penalty: Option<f64>,
    #[serde(default)]
    pub frequency_penalty: Option<f64>,
    /// End-user identifier attached to every request
    #[serde(default)]
    pub user: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            system_prompt: None,
            temperature: None,
            top_p: None,
            max_tokens: None,
            presence_penalty: None,
            frequency_penalty: None,
            user: None,
        }
    }
}

impl DefaultsConfig {
    /// Fill fields the request leaves unset; explicit values win
    #[must_use]
    pub fn apply(&self, mut request: ChatRequest) -> ChatRequest {
        request.temperature = request.temperature.or(self.temperature);
        request.top_p = request.top_p.or(self.top_p);
        request.max_tokens = request.max_tokens.or(self.max_tokens);
        request.presence_penalty = request.presence_penalty.or(self.presence_penalty);
        request.frequency_penalty = request.frequency_penalty.or(self.frequency_penalty);
        if request.user.is_none() {
            request.user.clone_from(&self.user);
        }
        request
    }
}

fn default_model() -> String {
    models::GPT_35_TURBO.to_owned()
}

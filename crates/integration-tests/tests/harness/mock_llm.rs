//! Mock chat-completion service for integration tests
//!
//! Echoes the last user message back and records every request it sees.
//! A few reserved model names trigger failure modes.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// API key the mock accepts
pub const VALID_KEY: &str = "good-key";

/// Model that makes the mock answer 500 with a non-JSON body
pub const BROKEN_MODEL: &str = "broken-model";

/// Model that makes the mock answer 200 with a non-JSON body
pub const GARBLED_MODEL: &str = "garbled-model";

/// Model that makes the mock wait before answering
pub const SLOW_MODEL: &str = "slow-model";

/// A request as received by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Value of the organization header, if sent
    pub organization: Option<String>,
    /// Raw JSON body
    pub body: serde_json::Value,
}

/// Mock backend returning predictable responses
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockLlmState>,
}

struct MockLlmState {
    completion_count: AtomicU32,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockLlm {
    /// Start the mock server on an ephemeral port
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            completion_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`; the client appends `/chat/completions`
    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}/v1", self.addr)).expect("mock address is a valid URL")
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("request log poisoned").clone()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Wire types --

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionResponse {
    id: String,
    object: &'static str,
    created: i64,
    model: String,
    system_fingerprint: &'static str,
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Serialize)]
struct Choice {
    index: u32,
    message: ChatMessage,
    finish_reason: &'static str,
}

#[derive(Debug, Serialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// -- Handlers --

async fn handle_chat_completions(
    State(state): State<Arc<MockLlmState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let n = state.completion_count.fetch_add(1, Ordering::Relaxed) + 1;

    let organization = headers
        .get("openai-organization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    state
        .requests
        .lock()
        .expect("request log poisoned")
        .push(RecordedRequest {
            organization,
            body: body.clone(),
        });

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_KEY}"));

    if !authorized {
        let error = serde_json::json!({
            "error": {
                "message": "bad key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        });
        return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
    }

    let request: ChatCompletionRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => {
            let error = serde_json::json!({
                "error": {"message": e.to_string(), "type": "invalid_request_error", "code": null}
            });
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match request.model.as_str() {
        BROKEN_MODEL => return (StatusCode::INTERNAL_SERVER_ERROR, "kaboom").into_response(),
        GARBLED_MODEL => return (StatusCode::OK, "definitely not json").into_response(),
        SLOW_MODEL => tokio::time::sleep(Duration::from_secs(5)).await,
        _ => {}
    }

    let prompt = request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map_or("", |m| m.content.as_str());

    let content = format!("echo: {prompt}");
    let prompt_tokens = u32::try_from(request.messages.len()).unwrap_or(u32::MAX);
    let completion_tokens = u32::try_from(content.split_whitespace().count()).unwrap_or(u32::MAX);

    Json(ChatCompletionResponse {
        id: format!("chatcmpl-{n}"),
        object: "chat.completion",
        created: 1_700_000_000,
        model: request.model,
        system_fingerprint: "fp_mock",
        choices: vec![Choice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_owned(),
                content,
            },
            finish_reason: "stop",
        }],
        usage: Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        },
    })
    .into_response()
}

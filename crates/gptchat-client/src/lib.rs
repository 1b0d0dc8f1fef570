#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust HTTP client for chat-completion APIs
//!
//! Builds the request payload, attaches credentials, performs a single
//! POST to `/chat/completions`, and decodes either the response or the
//! structured error returned by the service

mod client;
mod de;
pub mod error;
pub mod models;
pub mod types;

pub use client::{ChatClient, DEFAULT_BASE_URL, ORGANIZATION_HEADER};
pub use error::{ApiError, ChatClientError, ErrorDetails, Result};
pub use types::*;

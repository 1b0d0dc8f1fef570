//! Well-known model identifiers
//!
//! `ChatRequest::model` is an open string; these are conveniences only.

pub const GPT_35_TURBO: &str = "gpt-3.5-turbo";
pub const GPT_35_TURBO_0301: &str = "gpt-3.5-turbo-0301";
pub const GPT_4: &str = "gpt-4";
pub const GPT_4O: &str = "gpt-4o";
pub const GPT_4O_MINI: &str = "gpt-4o-mini";

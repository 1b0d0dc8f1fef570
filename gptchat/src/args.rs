use std::path::PathBuf;

use clap::Parser;

/// Send a prompt to a chat-completion API and print the reply
#[derive(Debug, Parser)]
#[command(name = "gptchat", about = "Send a prompt to a chat-completion API and print the reply")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "gptchat.toml", env = "GPTCHAT_CONFIG")]
    pub config: PathBuf,

    /// Model to use instead of the configured default
    #[arg(short, long)]
    pub model: Option<String>,

    /// System prompt placed before the user prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Sampling temperature (0.0 to 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Number of choices to generate
    #[arg(short)]
    pub n: Option<u32>,

    /// Stop sequence (repeatable, up to 4)
    #[arg(long = "stop", num_args = 1)]
    pub stop: Vec<String>,

    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,

    /// Prompt text; words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

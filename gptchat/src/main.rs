#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::Args;
use clap::Parser;
use gptchat_client::{ChatRequest, ChatResponse, Message};
use gptchat_config::{Config, DefaultsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    gptchat_telemetry::init(config.telemetry.as_ref(), "warn")?;

    tracing::info!(config_path = %args.config.display(), "starting gptchat");

    let client = config.client.build_client()?;
    let request = build_request(&args, &config.defaults);

    let response = client.chat(&request).await?;

    tracing::info!(
        id = %response.id,
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        total_tokens = response.usage.total_tokens,
        "chat completion finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_choices(&response);
    }

    Ok(())
}

/// Assemble the request from flags, falling back to configured defaults
fn build_request(args: &Args, defaults: &DefaultsConfig) -> ChatRequest {
    let model = args.model.clone().unwrap_or_else(|| defaults.model.clone());

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = args.system.as_ref().or(defaults.system_prompt.as_ref()) {
        messages.push(Message::system(system.as_str()));
    }
    messages.push(Message::user(args.prompt.join(" ")));

    let mut request = ChatRequest::new(model, messages).with_stop(args.stop.iter().cloned());
    request.temperature = args.temperature;
    request.max_tokens = args.max_tokens;
    request.n = args.n;

    defaults.apply(request)
}

fn print_choices(response: &ChatResponse) {
    match response.choices.as_slice() {
        [only] => println!("{}", only.message.content),
        choices => {
            for choice in choices {
                println!("--- choice {} ({}) ---", choice.index, choice.finish_reason);
                println!("{}", choice.message.content);
            }
        }
    }
}

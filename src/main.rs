mod app;
mod cli;

use clap::Parser;
use doga::provider::doga::DogaProvider;
use doga::provider::{InvokeRequest, PromptMessage};
use doga::{config, paths};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = cli::Args::parse();

    let config_path = paths::config_path()?;
    let cfg = config::Config::load_optional(&config_path)?;
    tracing::debug!(?config_path, ?cfg, "resolved config");

    let credentials =
        config::resolve_credentials(cfg.as_ref(), std::env::var(config::API_KEY_ENV).ok());

    let model = args
        .model
        .clone()
        .or_else(|| cfg.as_ref().and_then(|c| c.model.clone()))
        .unwrap_or_else(|| "doga".to_string());

    let provider = DogaProvider::new();

    match args.cmd {
        Some(cli::Command::Validate) => return app::cmd_validate(&provider, &credentials),
        Some(cli::Command::Tokens { prompt }) => {
            return app::cmd_tokens(&provider, &model, &credentials, prompt.join(" "));
        }
        Some(cli::Command::Errors) => return app::cmd_errors(&provider),
        None => {}
    }

    let prompt = args.prompt.join(" ");
    if prompt.trim().is_empty() {
        anyhow::bail!("No prompt provided. Try: doga \"Hello\"");
    }

    let stream = !args.no_stream && cfg.as_ref().and_then(|c| c.stream).unwrap_or(true);

    let request = InvokeRequest {
        model,
        credentials,
        prompt_messages: vec![PromptMessage::user(prompt)],
        stop: (!args.stop.is_empty()).then_some(args.stop),
        stream,
        user: args.user,
        ..Default::default()
    };

    app::cmd_generate(&provider, request).await
}

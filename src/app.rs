use doga::provider::doga::DogaProvider;
use doga::provider::{
    Credentials, InvokeRequest, LargeLanguageModel, LlmResponse, ModelProvider, PromptMessage,
};
use std::io::Write;
use tokio_stream::StreamExt;

pub fn cmd_validate(provider: &DogaProvider, credentials: &Credentials) -> anyhow::Result<()> {
    provider.validate_provider_credentials(credentials)?;
    println!("{}: credentials ok", provider.name());
    Ok(())
}

pub fn cmd_tokens(
    provider: &DogaProvider,
    model: &str,
    credentials: &Credentials,
    prompt: String,
) -> anyhow::Result<()> {
    let messages = [PromptMessage::user(prompt)];
    let n = provider.llm().count_tokens(model, credentials, &messages, None);
    println!("{n}");
    Ok(())
}

pub fn cmd_errors(provider: &DogaProvider) -> anyhow::Result<()> {
    for (category, kinds) in provider.llm().invoke_error_mapping() {
        println!("{category:?}\t{kinds:?}");
    }
    Ok(())
}

pub async fn cmd_generate(provider: &DogaProvider, request: InvokeRequest) -> anyhow::Result<()> {
    let response = provider.llm().invoke(request)?;

    let mut out = std::io::stdout();
    match response {
        LlmResponse::Complete(result) => {
            writeln!(out, "{}", result.content())?;
        }
        LlmResponse::Stream(mut stream) => {
            // Iterator::next is also in scope.
            while let Some(chunk) = StreamExt::next(&mut stream).await {
                write!(out, "{}", chunk.delta.message.content)?;
                out.flush().ok();
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

use doga::provider::doga::{DogaProvider, COMPLETION_TEXT, STREAM_FRAGMENTS};
use doga::provider::{
    Credentials, InvokeErrorKind, InvokeRequest, LargeLanguageModel, ModelProvider,
    PromptMessage, PromptMessageTool,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const SENTENCE: &str = "我是个传奇的人物,不管你信不信,这都是个事实。哈哈";

fn credentials(v: serde_json::Value) -> Credentials {
    match v {
        serde_json::Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn busy_request(stream: bool) -> InvokeRequest {
    InvokeRequest {
        model: "doga-pro".into(),
        credentials: credentials(json!({"api_key": "sk-1", "endpoint": "https://x.invalid"})),
        prompt_messages: vec![
            PromptMessage::system("answer in French"),
            PromptMessage::user("what is 2 + 2?"),
        ],
        model_parameters: credentials(json!({"temperature": 1.7, "max_tokens": 3})),
        tools: Some(vec![PromptMessageTool {
            name: "calculator".into(),
            description: "adds numbers".into(),
            parameters: json!({"type": "object"}),
        }]),
        stop: Some(vec!["\n".into()]),
        stream,
        user: Some("user-42".into()),
    }
}

#[test]
fn provider_accepts_any_credentials() {
    let provider = DogaProvider::new();
    for creds in [
        json!({}),
        json!({"api_key": ""}),
        json!({"api_key": null, "endpoint": 12, "nested": {"a": [1, 2]}}),
    ] {
        provider
            .validate_provider_credentials(&credentials(creds))
            .unwrap();
    }
    provider
        .llm()
        .validate_credentials("anything", &Credentials::new())
        .unwrap();
}

#[test]
fn stream_is_four_fixed_chunks_for_any_input() {
    let llm = DogaProvider::new().llm().clone();

    for request in [
        InvokeRequest {
            stream: true,
            ..Default::default()
        },
        busy_request(true),
    ] {
        let model = request.model.clone();
        let messages = request.prompt_messages.clone();
        let chunks: Vec<_> = llm.invoke(request).unwrap().into_stream().unwrap().collect();

        assert_eq!(chunks.len(), 4);
        let texts: Vec<&str> = chunks.iter().map(|c| c.delta.message.content.as_str()).collect();
        assert_eq!(texts, STREAM_FRAGMENTS);
        assert_eq!(texts.concat(), SENTENCE);
        for chunk in &chunks {
            assert_eq!(chunk.delta.index, 0);
            assert!(chunk.delta.message.tool_calls.is_empty());
            assert_eq!(chunk.model, model);
            assert_eq!(chunk.prompt_messages, messages);
        }
    }
}

#[tokio::test]
async fn stream_can_be_consumed_asynchronously() {
    use tokio_stream::StreamExt;

    let llm = DogaProvider::new().llm().clone();
    let mut stream = llm.invoke(busy_request(true)).unwrap().into_stream().unwrap();

    let mut text = String::new();
    while let Some(chunk) = StreamExt::next(&mut stream).await {
        text.push_str(&chunk.delta.message.content);
    }
    assert_eq!(text, SENTENCE);
}

#[test]
fn sync_result_is_fixed_with_empty_usage() {
    let llm = DogaProvider::new().llm().clone();

    for request in [InvokeRequest::default(), busy_request(false)] {
        let result = llm.invoke(request).unwrap().into_result().unwrap();
        assert_eq!(result.content(), COMPLETION_TEXT);
        assert!(result.message.tool_calls.is_empty());
        assert!(result.usage.is_empty());
        assert_eq!(result.usage.prompt_tokens, 0);
        assert_eq!(result.usage.completion_tokens, 0);
        assert_eq!(result.usage.total_tokens, 0);
    }
}

#[test]
fn count_tokens_is_zero() {
    let provider = DogaProvider::new();
    let llm = provider.llm();
    assert_eq!(llm.count_tokens("doga", &Credentials::new(), &[], None), 0);

    let request = busy_request(false);
    let n = llm.count_tokens(
        &request.model,
        &request.credentials,
        &request.prompt_messages,
        request.tools.as_deref(),
    );
    assert_eq!(n, 0);
}

#[test]
fn error_mapping_covers_five_categories() {
    let mapping = DogaProvider::new().llm().invoke_error_mapping();
    assert_eq!(mapping.len(), 5);
    let keys: Vec<InvokeErrorKind> = mapping.keys().copied().collect();
    assert_eq!(keys, InvokeErrorKind::MAPPABLE);
    assert!(mapping.values().all(|kinds| !kinds.is_empty()));
}

#[test]
fn dropping_stream_early_leaves_later_calls_intact() {
    let llm = DogaProvider::new().llm().clone();

    let mut first = llm.invoke(busy_request(true)).unwrap().into_stream().unwrap();
    assert_eq!(first.next().unwrap().delta.message.content, STREAM_FRAGMENTS[0]);
    assert_eq!(first.remaining(), 3);
    drop(first);

    let second: Vec<_> = llm.invoke(busy_request(true)).unwrap().into_stream().unwrap().collect();
    assert_eq!(second.len(), 4);

    let result = llm.invoke(busy_request(false)).unwrap().into_result().unwrap();
    assert_eq!(result.content(), COMPLETION_TEXT);
}

#[test]
fn chunks_serialize_for_the_host() {
    let llm = DogaProvider::new().llm().clone();
    let chunk = llm
        .invoke(busy_request(true))
        .unwrap()
        .into_stream()
        .unwrap()
        .next()
        .unwrap();

    let v = serde_json::to_value(&chunk).unwrap();
    assert_eq!(v["model"], "doga-pro");
    assert_eq!(v["delta"]["index"], 0);
    assert_eq!(v["delta"]["message"]["tool_calls"], json!([]));
    assert_eq!(v["prompt_messages"][1]["role"], "user");
}

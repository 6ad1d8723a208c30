use super::errors::{BackendError, CredentialsValidateFailedError, InvokeErrorKind, InvokeErrorMapping};
use super::stream::ChunkStream;
use super::types::{
    AssistantPromptMessage, Credentials, InvokeRequest, LlmResponse, LlmResult, LlmResultChunk,
    LlmResultChunkDelta, LlmUsage, PromptMessage, PromptMessageTool,
};
use super::{LargeLanguageModel, ModelProvider, ModelType};

pub const PROVIDER_NAME: &str = "doga";

/// Model used to probe provider-level credentials.
pub const VALIDATE_MODEL: &str = "doga";

pub const STREAM_FRAGMENTS: [&str; 4] = ["我是个传奇的人物,", "不管你信不信,", "这都是个事实。", "哈哈"];

pub const COMPLETION_TEXT: &str = "我是个传奇的人物";

/// Error returned by the doga HTTP API, with the request it belonged to.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message} ({method} {url})")]
pub struct DogaApiError {
    pub message: String,
    pub method: reqwest::Method,
    pub url: reqwest::Url,
    pub body: Option<serde_json::Value>,
}

impl DogaApiError {
    pub fn new(message: impl Into<String>, method: reqwest::Method, url: reqwest::Url) -> Self {
        Self {
            message: message.into(),
            method,
            url,
            body: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogaErrorKind {
    Api,
}

#[derive(Debug, thiserror::Error)]
pub enum DogaError {
    #[error(transparent)]
    Api(#[from] DogaApiError),
}

impl BackendError for DogaError {
    type Kind = DogaErrorKind;

    fn kind(&self) -> DogaErrorKind {
        match self {
            DogaError::Api(_) => DogaErrorKind::Api,
        }
    }
}

/// Canned-text adapter; no request ever leaves the process.
#[derive(Debug, Default, Clone)]
pub struct DogaLargeLanguageModel;

impl DogaLargeLanguageModel {
    pub fn new() -> Self {
        Self
    }

    fn stream_response(&self, request: &InvokeRequest) -> ChunkStream {
        let chunks = STREAM_FRAGMENTS
            .iter()
            .map(|text| LlmResultChunk {
                model: request.model.clone(),
                prompt_messages: request.prompt_messages.clone(),
                system_fingerprint: None,
                delta: LlmResultChunkDelta {
                    index: 0,
                    message: AssistantPromptMessage::text(*text),
                    usage: None,
                    finish_reason: None,
                },
            })
            .collect();
        ChunkStream::new(chunks)
    }

    fn sync_response(&self, request: InvokeRequest) -> LlmResult {
        LlmResult {
            model: request.model,
            prompt_messages: request.prompt_messages,
            message: AssistantPromptMessage::text(COMPLETION_TEXT),
            usage: LlmUsage::empty(),
            system_fingerprint: None,
        }
    }
}

impl LargeLanguageModel for DogaLargeLanguageModel {
    type Error = DogaError;

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn generate(&self, request: InvokeRequest) -> Result<LlmResponse, DogaError> {
        if request.stream {
            Ok(LlmResponse::Stream(self.stream_response(&request)))
        } else {
            Ok(LlmResponse::Complete(self.sync_response(request)))
        }
    }

    fn count_tokens(
        &self,
        _model: &str,
        _credentials: &Credentials,
        _prompt_messages: &[PromptMessage],
        _tools: Option<&[PromptMessageTool]>,
    ) -> u64 {
        0
    }

    fn validate_credentials(&self, _model: &str, _credentials: &Credentials) -> anyhow::Result<()> {
        Ok(())
    }

    fn invoke_error_mapping(&self) -> InvokeErrorMapping<DogaErrorKind> {
        // The API reports a single error type, so every category maps to it.
        InvokeErrorKind::MAPPABLE
            .into_iter()
            .map(|category| (category, vec![DogaErrorKind::Api]))
            .collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct DogaProvider {
    llm: DogaLargeLanguageModel,
}

impl DogaProvider {
    pub fn new() -> Self {
        Self {
            llm: DogaLargeLanguageModel::new(),
        }
    }
}

impl ModelProvider for DogaProvider {
    type Llm = DogaLargeLanguageModel;

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn supported_model_types(&self) -> &'static [ModelType] {
        &[ModelType::Llm]
    }

    fn llm(&self) -> &DogaLargeLanguageModel {
        &self.llm
    }

    fn validate_provider_credentials(&self, credentials: &Credentials) -> anyhow::Result<()> {
        let result = self.llm.validate_credentials(VALIDATE_MODEL, credentials);
        surface_validation_error(self.name(), result)
    }
}

/// Passes credential rejections through; logs anything else before re-raising it.
fn surface_validation_error(provider: &str, result: anyhow::Result<()>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.is::<CredentialsValidateFailedError>() => Err(err),
        Err(err) => {
            tracing::error!(provider, error = ?err, "{provider} credentials validate failed");
            Err(err)
        }
    }
}

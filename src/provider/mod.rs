//! Host plugin interface and the `doga` provider.

pub mod doga;
pub mod errors;
pub mod stream;
pub mod types;

use serde::{Deserialize, Serialize};

pub use errors::{
    BackendError, CredentialsValidateFailedError, InvokeError, InvokeErrorKind, InvokeErrorMapping,
};
pub use stream::ChunkStream;
pub use types::{
    AssistantPromptMessage, Credentials, InvokeRequest, LlmResponse, LlmResult, LlmResultChunk,
    LlmResultChunkDelta, LlmUsage, ModelParameters, PromptMessage, PromptMessageRole,
    PromptMessageTool, ToolCall, ToolCallFunction,
};

/// Model families a provider may expose to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelType {
    Llm,
    TextEmbedding,
    Rerank,
    Speech2text,
    Tts,
    Moderation,
}

/// Provider identity registered with the host.
pub trait ModelProvider: Send + Sync {
    type Llm: LargeLanguageModel;

    fn name(&self) -> &'static str;

    fn supported_model_types(&self) -> &'static [ModelType];

    /// The large-language-model adapter of this provider.
    fn llm(&self) -> &Self::Llm;

    /// Check that `credentials` can be used with this provider.
    ///
    /// Fails with [`CredentialsValidateFailedError`] when the backend rejects
    /// them; any other error is surfaced unchanged.
    fn validate_provider_credentials(&self, credentials: &Credentials) -> anyhow::Result<()>;
}

/// Text-generation adapter for one model family.
pub trait LargeLanguageModel: Send + Sync {
    type Error: BackendError;

    fn provider_name(&self) -> &'static str;

    /// Produce a full response or a chunk stream, depending on `request.stream`.
    fn generate(&self, request: InvokeRequest) -> Result<LlmResponse, Self::Error>;

    fn count_tokens(
        &self,
        model: &str,
        credentials: &Credentials,
        prompt_messages: &[PromptMessage],
        tools: Option<&[PromptMessageTool]>,
    ) -> u64;

    fn validate_credentials(&self, model: &str, credentials: &Credentials) -> anyhow::Result<()>;

    /// Unified category -> backend error kinds translated into it.
    fn invoke_error_mapping(&self) -> InvokeErrorMapping<<Self::Error as BackendError>::Kind>;

    fn transform_invoke_error(&self, err: &Self::Error) -> InvokeError {
        errors::transform(self.provider_name(), &self.invoke_error_mapping(), err)
    }

    /// Host-side call wrapper: generate, then translate backend errors.
    fn invoke(&self, request: InvokeRequest) -> Result<LlmResponse, InvokeError> {
        tracing::debug!(
            provider = self.provider_name(),
            model = %request.model,
            stream = request.stream,
            messages = request.prompt_messages.len(),
            "invoking model"
        );
        self.generate(request).map_err(|err| {
            let unified = self.transform_invoke_error(&err);
            tracing::warn!(provider = self.provider_name(), error = %err, kind = ?unified.kind, "model invoke failed");
            unified
        })
    }
}

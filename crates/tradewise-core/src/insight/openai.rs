use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use backoff::ExponentialBackoffBuilder;

use super::{ChatMessage, ChatModel, ChatRequest, ModelError, Role};
use crate::config::AssistantConfig;

/// OpenAI chat-completions client.
#[derive(Clone)]
pub struct OpenAiChatModel {
    client: Client<OpenAIConfig>,
}

impl OpenAiChatModel {
    pub fn new(client: Client<OpenAIConfig>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        let openai = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose())
            .with_api_base(config.openai_base_url.as_str());
        // async-openai retries 429s for up to 15 minutes by default; one attempt only.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Self::new(Client::with_config(openai).with_backoff(no_retry))
    }

    async fn create(&self, request: ChatRequest) -> Result<String, ModelError> {
        let messages = request
            .messages
            .into_iter()
            .map(to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let body = CreateChatCompletionRequestArgs::default()
            .model(request.model)
            .temperature(request.temperature)
            .messages(messages)
            .build()
            .map_err(map_openai_error)?;

        let response = self
            .client
            .chat()
            .create(body)
            .await
            .map_err(map_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModelError::empty_reply("model returned no message content"))
    }
}

impl ChatModel for OpenAiChatModel {
    fn complete<'a>(
        &'a self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>> {
        Box::pin(self.create(request))
    }
}

fn to_openai_message(message: ChatMessage) -> Result<ChatCompletionRequestMessage, ModelError> {
    let converted: Result<ChatCompletionRequestMessage, OpenAIError> = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content)
            .build()
            .map(Into::into),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content)
            .build()
            .map(Into::into),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content)
            .build()
            .map(Into::into),
    };
    converted.map_err(map_openai_error)
}

fn map_openai_error(error: OpenAIError) -> ModelError {
    match error {
        OpenAIError::ApiError(api) => ModelError::provider(api.message),
        OpenAIError::Reqwest(e) => ModelError::transport(format!("openai transport error: {e}")),
        OpenAIError::JSONDeserialize(e) => {
            ModelError::provider(format!("failed to parse openai response: {e}"))
        }
        OpenAIError::InvalidArgument(message) => ModelError::invalid_request(message),
        other => ModelError::transport(other.to_string()),
    }
}

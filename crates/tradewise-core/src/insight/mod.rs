//! Insight generation: prompt rendering plus one chat-completion call.
//!
//! [`InsightGenerator::generate`] only accepts a [`Quote`], so a model call
//! cannot happen without a quote fetched first.

mod openai;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{AssistantConfig, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::prompt::PromptTemplate;
use crate::{Insight, Quote};

pub use openai::OpenAiChatModel;

/// Role tag of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

/// Model-call failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelErrorKind {
    InvalidRequest,
    Transport,
    Provider,
    EmptyReply,
}

/// Structured model-call failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelError {
    kind: ModelErrorKind,
    message: String,
}

impl ModelError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::InvalidRequest, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::Transport, message)
    }

    /// The provider rejected the call (bad key, quota, unknown model).
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::Provider, message)
    }

    pub fn empty_reply(message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::EmptyReply, message)
    }

    fn new(kind: ModelErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ModelErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ModelErrorKind::InvalidRequest => "model.invalid_request",
            ModelErrorKind::Transport => "model.transport",
            ModelErrorKind::Provider => "model.provider",
            ModelErrorKind::EmptyReply => "model.empty_reply",
        }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ModelError {}

/// Hosted chat-completion model.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>>;
}

/// Renders the prompt for a quote and asks the model for a recommendation.
#[derive(Clone)]
pub struct InsightGenerator {
    model: Arc<dyn ChatModel>,
    template: PromptTemplate,
    model_id: String,
    temperature: f32,
}

impl InsightGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            template: PromptTemplate::default(),
            model_id: String::from(DEFAULT_MODEL),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn from_config(model: Arc<dyn ChatModel>, config: &AssistantConfig) -> Self {
        Self {
            model_id: config.model.clone(),
            temperature: config.temperature,
            ..Self::new(model)
        }
    }

    /// The exact request [`generate`](Self::generate) sends for `quote`.
    pub fn request_for(&self, quote: &Quote) -> ChatRequest {
        ChatRequest {
            model: self.model_id.clone(),
            temperature: self.temperature,
            messages: vec![ChatMessage::user(self.template.render(quote))],
        }
    }

    pub async fn generate(&self, quote: &Quote) -> Result<Insight, ModelError> {
        let request = self.request_for(quote);
        tracing::debug!(
            model = %request.model,
            temperature = request.temperature,
            "requesting trading insight"
        );

        let text = self.model.complete(request).await?;
        Ok(Insight::new(quote.symbol.clone(), self.model_id.clone(), text))
    }
}

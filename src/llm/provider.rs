use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{ConciergeError, Result};
use crate::llm::api::{
    LlmApiClient, LMSTUDIO_BASE_URL, OLLAMA_BASE_URL, OPENAI_BASE_URL, OPENROUTER_BASE_URL,
};
use crate::models::ChatMessage;

/// Capability interface for the fallback conversation path.
///
/// The dispatcher talks to this trait, not to a concrete client, so a
/// secondary backend (or a scripted one in tests) is swapped in via
/// construction, never by editing dispatch code. [`LlmProvider`] is the
/// default implementation; an unconfigured provider reports itself
/// unavailable rather than erroring at startup.
#[async_trait]
pub trait ConversationBackend: Send + Sync {
    fn is_available(&self) -> bool;

    /// Produce a reply to `user_text` given the system prompt and the
    /// trailing transcript window.
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_text: &str,
    ) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    /// Effective endpoint base URL, honoring an explicit override.
    pub fn base_url(&self) -> Option<&str> {
        if let Some(base_url) = self.config().and_then(|c| c.base_url.as_deref()) {
            return Some(base_url);
        }

        match &self.backend {
            LlmBackend::OpenAI => Some(OPENAI_BASE_URL),
            LlmBackend::OpenRouter => Some(OPENROUTER_BASE_URL),
            LlmBackend::Ollama => Some(OLLAMA_BASE_URL),
            LlmBackend::LmStudio => Some(LMSTUDIO_BASE_URL),
            LlmBackend::OpenAICompatible { base_url } => Some(base_url),
            LlmBackend::Unavailable { .. } => None,
        }
    }

    pub fn model(&self) -> Option<&str> {
        self.config().map(|c| c.model.as_str())
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM backend is not configured".to_string(),
        }
    }
}

#[async_trait]
impl ConversationBackend for LlmProvider {
    fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    async fn reply(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_text: &str,
    ) -> Result<String> {
        if !self.is_available() {
            return Err(ConciergeError::LlmUnavailable(self.unavailable_reason()));
        }

        let config = self
            .config()
            .ok_or_else(|| ConciergeError::LlmUnavailable("No config available".to_string()))?;

        let client = LlmApiClient::new(config)?;
        client.chat(system_prompt, history, user_text).await
    }
}

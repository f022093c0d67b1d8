use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Default greeting shown as the first transcript message of every session.
pub const DEFAULT_GREETING: &str =
    "Hi! I'm your virtual assistant. Ask me about your accounts, super, fees, or anything else on the portal.";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub faq: FaqConfig,
    pub llm: Option<LlmConfig>,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Dispatcher tuning for the chat response path.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Minimum FAQ match confidence (0-100) for the cached-answer path.
    /// The boundary is inclusive: a match exactly at the threshold is served
    /// from the catalog.
    pub faq_confidence_threshold: u8,
    /// Number of trailing transcript messages forwarded to the fallback
    /// completion endpoint (3 user/assistant exchanges by default).
    pub history_window: usize,
    /// Assistant greeting that seeds every fresh transcript.
    pub greeting: String,
    /// Maximum number of live chat sessions kept in memory (LRU eviction).
    pub session_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            faq_confidence_threshold: 75,
            history_window: 6,
            greeting: DEFAULT_GREETING.to_string(),
            session_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaqConfig {
    /// Optional path to a catalog JSON file overriding the bundled catalog.
    pub catalog_path: Option<String>,
}

/// LLM configuration for the fallback chat-completion backend.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Reserved for a future text-to-speech integration. The no-op
    /// synthesizer is used while this is false.
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("CONCIERGE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CONCIERGE_PORT", 3000),
            },
            chat: ChatConfig {
                faq_confidence_threshold: parse_env_or("CHAT_FAQ_THRESHOLD", 75),
                history_window: parse_env_or("CHAT_HISTORY_WINDOW", 6),
                greeting: env::var("CHAT_GREETING").unwrap_or_else(|_| DEFAULT_GREETING.to_string()),
                session_capacity: parse_env_or("CHAT_SESSION_CAPACITY", 1024),
            },
            faq: FaqConfig {
                catalog_path: env::var("FAQ_CATALOG_PATH").ok(),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 3),
                temperature: parse_env_or("LLM_TEMPERATURE", 0.7),
                max_tokens: parse_env_or("LLM_MAX_TOKENS", 500),
            }),
            speech: SpeechConfig {
                enabled: parse_env_or("SPEECH_ENABLED", false),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}

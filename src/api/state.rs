use std::sync::Arc;

use crate::chat::{ChatDispatcher, SessionStore};
use crate::config::Config;
use crate::faq::{FaqCatalog, FaqMatcher};
use crate::llm::LlmProvider;
use crate::models::UserProfile;
use crate::speech::SpeechSynthesizer;

/// Shared application state injected into every handler.
///
/// Cloning is cheap; everything heavyweight is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<FaqCatalog>,
    pub matcher: FaqMatcher,
    pub llm: LlmProvider,
    pub sessions: SessionStore,
    pub speech: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<FaqCatalog>,
        llm: LlmProvider,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let matcher = FaqMatcher::new(catalog.clone());
        let sessions = SessionStore::new(config.chat.session_capacity);
        Self {
            config,
            catalog,
            matcher,
            llm,
            sessions,
            speech,
        }
    }

    /// Build a dispatcher for a fresh session. When the caller supplies no
    /// profile, the bundled demo profile is used.
    pub fn new_dispatcher(&self, profile: Option<UserProfile>) -> ChatDispatcher {
        ChatDispatcher::new(
            self.matcher.clone(),
            Arc::new(self.llm.clone()),
            self.speech.clone(),
            profile.unwrap_or_else(UserProfile::demo),
            self.config.chat.clone(),
        )
    }
}

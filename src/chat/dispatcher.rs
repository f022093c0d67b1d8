use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::ChatConfig;
use crate::error::{ConciergeError, Result};
use crate::faq::FaqMatcher;
use crate::llm::prompts::assistant_system_prompt;
use crate::llm::ConversationBackend;
use crate::models::{ChatMessage, MessageSource, UserProfile};
use crate::speech::SpeechSynthesizer;

/// Uniform reply for any fallback-path failure. The transcript never carries
/// transport detail; the real error goes to the log.
pub const FALLBACK_ERROR_REPLY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again in a moment.";

/// Reply when the fallback backend is not configured at all. Names the
/// missing configuration so an operator can act on it.
pub const UNCONFIGURED_BACKEND_REPLY: &str =
    "I can answer common questions from our FAQ right now, but live assistance is not available: \
     the assistant backend is not configured (set LLM_MODEL and LLM_API_KEY).";

/// Owns one session's transcript and orchestrates the cached-answer versus
/// generated-answer decision.
///
/// All collaborators are injected at construction; there is no process-global
/// state. The transcript is append-only for the life of the session and
/// starts as a single greeting. At most one submission is in flight at a
/// time; a concurrent [`submit`](Self::submit) is rejected without touching
/// the transcript.
pub struct ChatDispatcher {
    matcher: FaqMatcher,
    backend: Arc<dyn ConversationBackend>,
    speech: Arc<dyn SpeechSynthesizer>,
    profile: UserProfile,
    settings: ChatConfig,
    transcript: Mutex<Vec<ChatMessage>>,
    in_flight: AtomicBool,
    open: AtomicBool,
}

/// Clears the in-flight flag on every exit path, including early returns and
/// panics inside the fallback call.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ChatDispatcher {
    pub fn new(
        matcher: FaqMatcher,
        backend: Arc<dyn ConversationBackend>,
        speech: Arc<dyn SpeechSynthesizer>,
        profile: UserProfile,
        settings: ChatConfig,
    ) -> Self {
        let greeting = ChatMessage::greeting(settings.greeting.clone());
        Self {
            matcher,
            backend,
            speech,
            profile,
            settings,
            transcript: Mutex::new(vec![greeting]),
            in_flight: AtomicBool::new(false),
            open: AtomicBool::new(false),
        }
    }

    /// Submit a user message and produce exactly one assistant reply.
    ///
    /// The user message is appended before any network interaction. A
    /// sufficiently confident FAQ match answers from the catalog verbatim;
    /// everything else goes to the fallback backend with the persona prompt
    /// and the trailing history window. Fallback failures are absorbed into a
    /// canned assistant reply, so a `Result::Err` here only ever means the
    /// submission itself was rejected (blank input or another submission in
    /// flight) and the transcript was not touched.
    pub async fn submit(&self, text: &str) -> Result<ChatMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConciergeError::Validation(
                "Message cannot be empty".to_string(),
            ));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ConciergeError::ChatBusy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let history = {
            let mut transcript = self.transcript.lock().unwrap();
            transcript.push(ChatMessage::user(trimmed));
            let prior = &transcript[..transcript.len() - 1];
            let window_start = prior.len().saturating_sub(self.settings.history_window);
            prior[window_start..].to_vec()
        };

        let reply = match self.matcher.best_match(trimmed) {
            Some(hit) if hit.confidence >= self.settings.faq_confidence_threshold => {
                tracing::debug!(
                    confidence = hit.confidence,
                    question = %hit.entry.question,
                    "Answering from FAQ catalog"
                );
                ChatMessage::assistant(hit.entry.answer, MessageSource::Faq, Some(hit.confidence))
            }
            _ => self.fallback_reply(&history, trimmed).await,
        };

        self.transcript.lock().unwrap().push(reply.clone());
        self.maybe_speak(&reply).await;

        Ok(reply)
    }

    async fn fallback_reply(&self, history: &[ChatMessage], user_text: &str) -> ChatMessage {
        let system_prompt = assistant_system_prompt(&self.profile);

        match self.backend.reply(&system_prompt, history, user_text).await {
            Ok(content) => ChatMessage::assistant(content, MessageSource::Ai, None),
            Err(ConciergeError::LlmUnavailable(reason)) => {
                tracing::warn!(%reason, "Fallback backend unavailable");
                ChatMessage::assistant(UNCONFIGURED_BACKEND_REPLY, MessageSource::Ai, None)
            }
            Err(error) => {
                tracing::error!(%error, "Fallback completion failed");
                ChatMessage::assistant(FALLBACK_ERROR_REPLY, MessageSource::Ai, None)
            }
        }
    }

    async fn maybe_speak(&self, reply: &ChatMessage) {
        if !self.speech.is_available() {
            return;
        }
        if let Err(error) = self.speech.synthesize(&reply.content).await {
            tracing::debug!(%error, "Speech synthesis failed");
        }
    }

    /// Reset the transcript to a single fresh greeting. Does not cancel an
    /// in-flight submission; its eventual reply appends to the reset
    /// transcript.
    pub fn clear(&self) {
        let mut transcript = self.transcript.lock().unwrap();
        transcript.clear();
        transcript.push(ChatMessage::greeting(self.settings.greeting.clone()));
    }

    /// Snapshot of the transcript in append order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().unwrap().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChatConfig;
    use crate::faq::FaqCatalog;
    use crate::models::{FaqEntry, MessageRole};
    use crate::speech::NoopSpeech;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    struct ScriptedBackend {
        reply: String,
    }

    #[async_trait]
    impl ConversationBackend for ScriptedBackend {
        fn is_available(&self) -> bool {
            true
        }

        async fn reply(&self, _: &str, _: &[ChatMessage], _: &str) -> Result<String> {
            Ok(self.reply.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ConversationBackend for FailingBackend {
        fn is_available(&self) -> bool {
            true
        }

        async fn reply(&self, _: &str, _: &[ChatMessage], _: &str) -> Result<String> {
            Err(ConciergeError::Llm("upstream exploded".to_string()))
        }
    }

    struct UnconfiguredBackend;

    #[async_trait]
    impl ConversationBackend for UnconfiguredBackend {
        fn is_available(&self) -> bool {
            false
        }

        async fn reply(&self, _: &str, _: &[ChatMessage], _: &str) -> Result<String> {
            Err(ConciergeError::LlmUnavailable("not configured".to_string()))
        }
    }

    /// Blocks inside reply() until released, to hold a submission in flight.
    struct BlockingBackend {
        release: Arc<Notify>,
        started: Arc<Notify>,
    }

    #[async_trait]
    impl ConversationBackend for BlockingBackend {
        fn is_available(&self) -> bool {
            true
        }

        async fn reply(&self, _: &str, _: &[ChatMessage], _: &str) -> Result<String> {
            self.started.notify_one();
            self.release.notified().await;
            Ok("slow reply".to_string())
        }
    }

    fn entry(question: &str, answer: &str, category: &str) -> FaqEntry {
        FaqEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.to_string(),
        }
    }

    fn super_catalog() -> Vec<FaqEntry> {
        vec![entry(
            "What is super?",
            "A retirement savings vehicle.",
            "Superannuation Basics",
        )]
    }

    fn dispatcher_with(
        entries: Vec<FaqEntry>,
        backend: Arc<dyn ConversationBackend>,
        settings: ChatConfig,
    ) -> ChatDispatcher {
        let catalog = Arc::new(FaqCatalog::from_entries(entries).expect("catalog"));
        ChatDispatcher::new(
            FaqMatcher::new(catalog),
            backend,
            Arc::new(NoopSpeech),
            UserProfile::demo(),
            settings,
        )
    }

    #[tokio::test]
    async fn starts_with_a_single_greeting() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(ScriptedBackend {
                reply: "generated".to_string(),
            }),
            ChatConfig::default(),
        );

        let messages = d.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::Assistant);
        assert!(messages[0].source.is_none());
        assert!(!d.is_in_flight());
    }

    #[tokio::test]
    async fn confident_match_answers_from_catalog_verbatim() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(ScriptedBackend {
                reply: "should not be used".to_string(),
            }),
            ChatConfig::default(),
        );

        let reply = d.submit("What is super?").await.expect("reply");
        assert_eq!(reply.content, "A retirement savings vehicle.");
        assert_eq!(reply.source, Some(MessageSource::Faq));
        assert!(reply.confidence.expect("confidence") >= 75);
    }

    #[tokio::test]
    async fn unmatched_query_uses_fallback_backend() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(ScriptedBackend {
                reply: "generated answer".to_string(),
            }),
            ChatConfig::default(),
        );

        let reply = d.submit("xyzzy unrelated gibberish").await.expect("reply");
        assert_eq!(reply.content, "generated answer");
        assert_eq!(reply.source, Some(MessageSource::Ai));
        assert!(reply.confidence.is_none());
    }

    #[tokio::test]
    async fn threshold_boundary_is_inclusive() {
        // "alpha beta gamma quux" against this question scores exactly 75.
        let entries = vec![entry("alpha beta gamma delta", "catalog answer", "misc")];

        let at_threshold = dispatcher_with(
            entries.clone(),
            Arc::new(ScriptedBackend {
                reply: "generated".to_string(),
            }),
            ChatConfig {
                faq_confidence_threshold: 75,
                ..ChatConfig::default()
            },
        );
        let reply = at_threshold
            .submit("alpha beta gamma quux")
            .await
            .expect("reply");
        assert_eq!(reply.source, Some(MessageSource::Faq));
        assert_eq!(reply.confidence, Some(75));
        assert_eq!(reply.content, "catalog answer");

        let above_threshold = dispatcher_with(
            entries,
            Arc::new(ScriptedBackend {
                reply: "generated".to_string(),
            }),
            ChatConfig {
                faq_confidence_threshold: 76,
                ..ChatConfig::default()
            },
        );
        let reply = above_threshold
            .submit("alpha beta gamma quux")
            .await
            .expect("reply");
        assert_eq!(reply.source, Some(MessageSource::Ai));
        assert_eq!(reply.content, "generated");
    }

    #[tokio::test]
    async fn empty_submission_is_rejected_without_state_change() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(ScriptedBackend {
                reply: "generated".to_string(),
            }),
            ChatConfig::default(),
        );

        let result = d.submit("   ").await;
        assert!(matches!(result, Err(ConciergeError::Validation(_))));
        assert_eq!(d.messages().len(), 1);
        assert!(!d.is_in_flight());
    }

    #[tokio::test]
    async fn concurrent_submission_is_rejected() {
        let release = Arc::new(Notify::new());
        let started = Arc::new(Notify::new());
        let d = Arc::new(dispatcher_with(
            super_catalog(),
            Arc::new(BlockingBackend {
                release: release.clone(),
                started: started.clone(),
            }),
            ChatConfig::default(),
        ));

        let first = {
            let d = d.clone();
            tokio::spawn(async move { d.submit("first question please").await })
        };
        started.notified().await;

        assert!(d.is_in_flight());
        let second = d.submit("second question").await;
        assert!(matches!(second, Err(ConciergeError::ChatBusy)));
        // Greeting plus the first user message only.
        assert_eq!(d.messages().len(), 2);

        release.notify_one();
        let reply = first.await.expect("join").expect("reply");
        assert_eq!(reply.content, "slow reply");
        assert_eq!(d.messages().len(), 3);
        assert!(!d.is_in_flight());
    }

    #[tokio::test]
    async fn transport_failure_yields_single_uniform_apology() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(FailingBackend),
            ChatConfig::default(),
        );

        let reply = d.submit("tell me something unmatched").await.expect("reply");
        assert_eq!(reply.content, FALLBACK_ERROR_REPLY);
        assert_eq!(reply.source, Some(MessageSource::Ai));

        let messages = d.messages();
        assert_eq!(messages.len(), 3);
        assert!(!d.is_in_flight());
    }

    #[tokio::test]
    async fn unconfigured_backend_names_the_missing_configuration() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(UnconfiguredBackend),
            ChatConfig::default(),
        );

        let reply = d.submit("something unmatched here").await.expect("reply");
        assert_eq!(reply.content, UNCONFIGURED_BACKEND_REPLY);
        assert!(reply.content.contains("LLM_MODEL"));
    }

    #[tokio::test]
    async fn transcript_is_2n_plus_1_in_chronological_order() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(ScriptedBackend {
                reply: "generated".to_string(),
            }),
            ChatConfig::default(),
        );

        for i in 0..4 {
            d.submit(&format!("question number {i}")).await.expect("reply");
        }

        let messages = d.messages();
        assert_eq!(messages.len(), 9);
        for pair in messages.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for (index, message) in messages.iter().enumerate().skip(1) {
            let expected = if index % 2 == 1 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            assert_eq!(message.role, expected, "message {index}");
        }
    }

    #[tokio::test]
    async fn clear_resets_to_single_greeting() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(ScriptedBackend {
                reply: "generated".to_string(),
            }),
            ChatConfig::default(),
        );

        d.submit("what is super").await.expect("reply");
        d.submit("unrelated question here").await.expect("reply");
        assert_eq!(d.messages().len(), 5);

        d.clear();
        let messages = d.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::Assistant);
        assert_eq!(messages[0].content, ChatConfig::default().greeting);
    }

    #[tokio::test]
    async fn clear_during_in_flight_request_keeps_the_late_reply() {
        let release = Arc::new(Notify::new());
        let started = Arc::new(Notify::new());
        let d = Arc::new(dispatcher_with(
            super_catalog(),
            Arc::new(BlockingBackend {
                release: release.clone(),
                started: started.clone(),
            }),
            ChatConfig::default(),
        ));

        let pending = {
            let d = d.clone();
            tokio::spawn(async move { d.submit("slow question ahead").await })
        };
        started.notified().await;

        d.clear();
        assert_eq!(d.messages().len(), 1);

        release.notify_one();
        pending.await.expect("join").expect("reply");

        // No cancellation: the late reply lands on the reset transcript.
        let messages = d.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "slow reply");
    }

    #[tokio::test]
    async fn open_close_toggle() {
        let d = dispatcher_with(
            super_catalog(),
            Arc::new(ScriptedBackend {
                reply: "generated".to_string(),
            }),
            ChatConfig::default(),
        );

        assert!(!d.is_open());
        d.open();
        assert!(d.is_open());
        d.close();
        assert!(!d.is_open());
    }

    #[tokio::test]
    async fn history_window_is_bounded() {
        struct CapturingBackend {
            seen: Mutex<Vec<usize>>,
        }

        #[async_trait]
        impl ConversationBackend for CapturingBackend {
            fn is_available(&self) -> bool {
                true
            }

            async fn reply(&self, _: &str, history: &[ChatMessage], _: &str) -> Result<String> {
                self.seen.lock().unwrap().push(history.len());
                Ok("ok".to_string())
            }
        }

        let backend = Arc::new(CapturingBackend {
            seen: Mutex::new(Vec::new()),
        });
        let d = dispatcher_with(
            super_catalog(),
            backend.clone(),
            ChatConfig {
                history_window: 6,
                ..ChatConfig::default()
            },
        );

        for i in 0..6 {
            d.submit(&format!("unmatched question {i}")).await.expect("reply");
        }

        let seen = backend.seen.lock().unwrap().clone();
        // Greeting counts toward the early windows; later calls cap at 6.
        assert_eq!(seen.last(), Some(&6));
        assert!(seen.iter().all(|len| *len <= 6));
    }
}

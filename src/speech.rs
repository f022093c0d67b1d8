//! Text-to-speech capability seam.
//!
//! The portal's original speech connector is not integrated yet; the
//! dispatcher only ever talks to this trait, and the no-op implementation is
//! selected whenever `SPEECH_ENABLED` is off or no real synthesizer is wired
//! in. A real backend replaces [`NoopSpeech`] through configuration, not by
//! editing call sites.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SpeechConfig;
use crate::error::{ConciergeError, Result};

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Render `text` to audio bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Default synthesizer: reports unavailable and never produces audio.
pub struct NoopSpeech;

#[async_trait]
impl SpeechSynthesizer for NoopSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Err(ConciergeError::SpeechUnavailable(
            "No speech synthesizer is configured".to_string(),
        ))
    }
}

pub fn from_config(config: &SpeechConfig) -> Arc<dyn SpeechSynthesizer> {
    if config.enabled {
        // No real synthesizer is shipped yet; warn rather than fail startup.
        tracing::warn!("SPEECH_ENABLED is set but no synthesizer backend exists; using no-op");
    }
    Arc::new(NoopSpeech)
}

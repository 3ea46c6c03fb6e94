//! Text-to-speech and speech recognition.
//!
//! [`SpeechBridge`] owns the at-most-one utterance and at-most-one
//! recognition invariants; engines only know how to talk or listen.

use std::sync::Arc;

use async_trait::async_trait;
use mindbridge_shared::constants::{
    RECOGNITION_UNSUPPORTED, SPEECH_PITCH, SPEECH_RATE, SPEECH_VOLUME,
};
use mindbridge_shared::protocol::SpeakRequest;
use mindbridge_shared::Language;
use thiserror::Error;

use crate::backend::WellnessBackend;
use crate::events::{Notification, Presenter};
use crate::state::Session;
use crate::tasks::TaskSlot;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("not supported by this engine")]
    Unsupported,

    #[error("{0}")]
    Synthesis(String),

    #[error("{0}")]
    Recognition(String),

    #[error("no speech detected")]
    NoSpeech,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    /// BCP 47 locale, e.g. `fr-FR`.
    pub locale: &'static str,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl VoiceSettings {
    pub fn for_language(language: Language) -> Self {
        Self {
            locale: language.speech_locale(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
            volume: SPEECH_VOLUME,
        }
    }
}

#[async_trait]
pub trait SpeechEngine: Send + Sync {
    fn supports_recognition(&self) -> bool;

    /// Speak `text` to completion.
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<(), SpeechError>;

    /// Listen for a single utterance and return its transcript.
    async fn recognize(&self, locale: &str) -> Result<String, SpeechError>;
}

/// Synthesis through the server's speech endpoint. The server plays the
/// audio; recognition is not available.
pub struct RemoteSpeech {
    backend: Arc<dyn WellnessBackend>,
}

impl RemoteSpeech {
    pub fn new(backend: Arc<dyn WellnessBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl SpeechEngine for RemoteSpeech {
    fn supports_recognition(&self) -> bool {
        false
    }

    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<(), SpeechError> {
        let request = SpeakRequest {
            text: text.to_string(),
            language: voice.locale.to_string(),
        };
        let response = self
            .backend
            .speak(&request)
            .await
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;
        if response.success {
            Ok(())
        } else {
            Err(SpeechError::Synthesis(
                response.message.unwrap_or_else(|| "speech failed".to_string()),
            ))
        }
    }

    async fn recognize(&self, _locale: &str) -> Result<String, SpeechError> {
        Err(SpeechError::Unsupported)
    }
}

/// Engine for environments without audio.
pub struct NoSpeech;

#[async_trait]
impl SpeechEngine for NoSpeech {
    fn supports_recognition(&self) -> bool {
        false
    }

    async fn synthesize(&self, _text: &str, _voice: &VoiceSettings) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    async fn recognize(&self, _locale: &str) -> Result<String, SpeechError> {
        Err(SpeechError::Unsupported)
    }
}

pub struct SpeechBridge {
    engine: Arc<dyn SpeechEngine>,
    presenter: Arc<dyn Presenter>,
    session: Session,
    synthesis_enabled: bool,
    utterance: TaskSlot,
    recognition: TaskSlot,
}

impl SpeechBridge {
    pub fn new(
        engine: Arc<dyn SpeechEngine>,
        presenter: Arc<dyn Presenter>,
        session: Session,
        synthesis_enabled: bool,
    ) -> Self {
        Self {
            engine,
            presenter,
            session,
            synthesis_enabled,
            utterance: TaskSlot::new(),
            recognition: TaskSlot::new(),
        }
    }

    /// Start speaking `text`, cutting off whatever is currently being said.
    pub fn speak(&self, text: &str, language: Language) {
        if !self.synthesis_enabled {
            return;
        }

        let engine = self.engine.clone();
        let presenter = self.presenter.clone();
        let text = text.to_string();
        let voice = VoiceSettings::for_language(language);

        self.utterance.spawn(async move {
            match engine.synthesize(&text, &voice).await {
                Ok(()) => {}
                Err(SpeechError::Unsupported) => {
                    tracing::debug!("Text-to-speech not supported, skipping utterance");
                }
                Err(e) => {
                    tracing::warn!(error = %e, locale = voice.locale, "Text-to-speech failed");
                    presenter.notify(Notification::error(format!("Text-to-speech error: {e}")));
                }
            }
        });
    }

    /// Stop the current utterance, if any.
    pub fn cancel_speech(&self) -> bool {
        self.utterance.cancel()
    }

    /// Start listening, or stop if already listening.
    ///
    /// The transcript of a completed recognition is passed to `on_transcript`.
    pub fn toggle_recognition<F>(&self, on_transcript: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        if self.session.is_listening() {
            self.stop_recognition();
            return;
        }

        if !self.engine.supports_recognition() {
            self.presenter
                .notify(Notification::error(RECOGNITION_UNSUPPORTED));
            return;
        }

        self.session.set_listening(true);
        self.presenter.set_listening(true);

        let engine = self.engine.clone();
        let presenter = self.presenter.clone();
        let session = self.session.clone();
        let locale = session.language().speech_locale();

        self.recognition.spawn(async move {
            let result = engine.recognize(locale).await;
            session.set_listening(false);
            presenter.set_listening(false);

            match result {
                Ok(transcript) => {
                    tracing::debug!(chars = transcript.len(), "Speech recognized");
                    on_transcript(transcript);
                }
                Err(SpeechError::NoSpeech) => {
                    tracing::debug!("Recognition ended without speech");
                }
                Err(e) => {
                    presenter.notify(Notification::error(format!(
                        "Speech recognition error: {e}"
                    )));
                }
            }
        });
    }

    pub fn stop_recognition(&self) {
        self.recognition.cancel();
        self.session.set_listening(false);
        self.presenter.set_listening(false);
    }
}

//! Wiring of the controllers around one session.

use std::sync::Arc;

use mindbridge_shared::language::{translate, TranslationKey};
use mindbridge_shared::Language;
use mindbridge_store::{
    ChatHistory, Database, KeyValueStore, LocalStorage, MemoryStorage, MoodHistory, Preferences,
};

use crate::backend::{HttpBackend, WellnessBackend};
use crate::chat::ChatController;
use crate::checkin::CheckinController;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::events::{Notification, Presenter};
use crate::history::HistoryController;
use crate::speech::{NoSpeech, RemoteSpeech, SpeechBridge, SpeechEngine};
use crate::state::Session;

pub struct MindBridge {
    pub session: Session,
    pub chat: ChatController,
    pub checkin: CheckinController,
    pub history: HistoryController,
    pub speech: Arc<SpeechBridge>,
    presenter: Arc<dyn Presenter>,
    preferences: Preferences,
}

impl MindBridge {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn WellnessBackend>,
        engine: Arc<dyn SpeechEngine>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let preferences = Preferences::new(store.clone());
        let language = preferences.language();
        let session = Session::new(language);

        let speech = Arc::new(SpeechBridge::new(
            engine,
            presenter.clone(),
            session.clone(),
            config.speech_enabled,
        ));

        let chat = ChatController::new(
            backend.clone(),
            presenter.clone(),
            speech.clone(),
            session.clone(),
            ChatHistory::load(store.clone()),
            config.pacing,
        );

        let checkin = CheckinController::new(
            backend,
            presenter.clone(),
            speech.clone(),
            session.clone(),
            MoodHistory::load(store),
            config.pacing,
        );

        let history = HistoryController::new(
            presenter.clone(),
            chat.clone(),
            checkin.clone(),
            speech.clone(),
            session.clone(),
            config.pacing,
        );

        presenter.set_language(language);
        tracing::info!(language = %language, "Session ready");

        Self {
            session,
            chat,
            checkin,
            history,
            speech,
            presenter,
            preferences,
        }
    }

    /// Build the app against the configured server and local storage.
    pub fn connect(config: &ClientConfig, presenter: Arc<dyn Presenter>) -> Result<Self> {
        let backend: Arc<dyn WellnessBackend> =
            Arc::new(HttpBackend::new(&config.server_url, config.request_timeout)?);
        let engine: Arc<dyn SpeechEngine> = if config.speech_enabled {
            Arc::new(RemoteSpeech::new(backend.clone()))
        } else {
            Arc::new(NoSpeech)
        };

        Ok(Self::new(
            config,
            open_storage(config),
            backend,
            engine,
            presenter,
        ))
    }

    pub fn language(&self) -> Language {
        self.session.language()
    }

    /// Switch the interface language and remember the choice.
    pub fn set_language(&self, language: Language) -> Result<()> {
        self.session.set_language(language);
        self.presenter.set_language(language);

        if let Err(e) = self.preferences.set_language(language) {
            tracing::error!(error = %e, "Failed to save language preference");
            self.presenter.notify(Notification::error(translate(
                TranslationKey::ErrorOccurred,
                language,
            )));
            return Err(e.into());
        }

        tracing::info!(language = %language, "Language changed");
        self.presenter.notify(Notification::success(translate(
            TranslationKey::LanguageChanged,
            language,
        )));
        Ok(())
    }

    /// Abort every pending timer, utterance and recognition.
    pub fn shutdown(&self) {
        self.chat.cancel_pending();
        self.checkin.cancel_pending();
        self.history.close_insights();
        self.speech.cancel_speech();
        if self.session.is_listening() {
            self.speech.stop_recognition();
        }
    }
}

/// Open the on-disk store, falling back to memory when it is unavailable.
pub fn open_storage(config: &ClientConfig) -> Arc<dyn KeyValueStore> {
    let opened = match &config.data_dir {
        Some(dir) => Database::open_in(dir),
        None => Database::new(),
    };

    match opened {
        Ok(db) => Arc::new(LocalStorage::new(db)),
        Err(e) => {
            tracing::warn!(error = %e, "Local storage unavailable, history will not persist");
            Arc::new(MemoryStorage::new())
        }
    }
}

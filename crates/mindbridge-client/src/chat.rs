//! Chat session controller.
//!
//! Drives one exchange at a time: the user's message is recorded
//! immediately, the reply (or a canned apology) follows after the backend
//! answers. Local commands short-circuit the network, and a debounced
//! monitor watches the draft for crisis language.

use std::sync::{Arc, Mutex};

use mindbridge_shared::commands::{self, ChatCommand};
use mindbridge_shared::constants::{
    APOLOGY_MESSAGE, CHAT_CONNECTION_ERROR, CRISIS_PREVENTION_MESSAGE, EMPTY_MESSAGE_WARNING,
    RESTORE_RECENT_COUNT,
};
use mindbridge_shared::crisis::first_crisis_phrase;
use mindbridge_shared::language::{translate, TranslationKey};
use mindbridge_shared::protocol::{ChatReply, ChatRequest};
use mindbridge_shared::{Language, MessageRecord};
use mindbridge_store::ChatHistory;

use crate::backend::WellnessBackend;
use crate::config::Pacing;
use crate::error::{ClientError, Result};
use crate::events::{Notification, Presenter};
use crate::speech::SpeechBridge;
use crate::state::{lock, Session};
use crate::tasks::{TaskSet, TaskSlot};

/// How a call to [`ChatController::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Nothing to send.
    Empty,
    /// Another exchange is still in flight.
    Busy,
    /// Answered locally from the command table.
    Command,
    Replied { crisis_detected: bool },
    /// The apology was shown instead of a reply.
    Failed,
}

#[derive(Clone)]
pub struct ChatController {
    inner: Arc<ChatInner>,
}

struct ChatInner {
    backend: Arc<dyn WellnessBackend>,
    presenter: Arc<dyn Presenter>,
    speech: Arc<SpeechBridge>,
    session: Session,
    history: Mutex<ChatHistory>,
    pacing: Pacing,
    crisis_debounce: TaskSlot,
    modals: TaskSet,
}

impl ChatController {
    pub fn new(
        backend: Arc<dyn WellnessBackend>,
        presenter: Arc<dyn Presenter>,
        speech: Arc<SpeechBridge>,
        session: Session,
        history: ChatHistory,
        pacing: Pacing,
    ) -> Self {
        Self {
            inner: Arc::new(ChatInner {
                backend,
                presenter,
                speech,
                session,
                history: Mutex::new(history),
                pacing,
                crisis_debounce: TaskSlot::new(),
                modals: TaskSet::default(),
            }),
        }
    }

    /// Send one message and present the outcome.
    pub async fn submit(&self, message: &str, language: Language) -> ExchangeOutcome {
        let inner = &self.inner;
        let message = message.trim();

        if message.is_empty() {
            inner
                .presenter
                .notify(Notification::warning(EMPTY_MESSAGE_WARNING));
            return ExchangeOutcome::Empty;
        }

        if let Some(command) = commands::lookup(message) {
            self.run_command(message, command, language).await;
            return ExchangeOutcome::Command;
        }

        if !inner.session.begin_exchange() {
            tracing::debug!("Exchange already in flight, ignoring submit");
            return ExchangeOutcome::Busy;
        }

        self.record(MessageRecord::user(message));
        self.clear_input();
        inner.presenter.set_typing_indicator(true);

        let request = ChatRequest {
            message: message.to_string(),
            language,
        };

        match self.exchange(&request).await {
            Ok(reply) => {
                tokio::time::sleep(inner.pacing.response_delay).await;
                self.finish_exchange();

                let crisis_detected = reply.crisis_detected;
                self.record(MessageRecord::assistant(&reply.text).with_crisis(crisis_detected));
                inner.speech.speak(&reply.text, language);

                if crisis_detected {
                    tracing::warn!(language = %language, "Server flagged crisis in chat exchange");
                    self.schedule_crisis_modal(inner.pacing.crisis_modal_delay);
                }
                ExchangeOutcome::Replied { crisis_detected }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat exchange failed");
                self.finish_exchange();
                self.record(MessageRecord::assistant(APOLOGY_MESSAGE));

                let text = match e {
                    ClientError::Http(_) => translate(TranslationKey::ConnectionError, language),
                    _ => CHAT_CONNECTION_ERROR,
                };
                inner.presenter.notify(Notification::error(text));
                ExchangeOutcome::Failed
            }
        }
    }

    /// Submit whatever is currently in the input, in the session language.
    pub async fn send_draft(&self) -> ExchangeOutcome {
        let session = &self.inner.session;
        let draft = session.draft();
        self.submit(&draft, session.language()).await
    }

    /// Handle an edit of the chat input.
    pub fn on_input(&self, text: &str) {
        let inner = &self.inner;
        inner.session.set_draft(text);
        inner.presenter.set_send_enabled(inner.session.can_send());

        match first_crisis_phrase(text) {
            Some(phrase) => {
                tracing::debug!(phrase, "Crisis phrase in draft, (re)starting debounce");
                let this = self.clone();
                let delay = inner.pacing.crisis_debounce;
                inner.crisis_debounce.spawn(async move {
                    tokio::time::sleep(delay).await;
                    this.intervene();
                });
            }
            None => {
                if inner.crisis_debounce.cancel() {
                    tracing::debug!("Draft no longer matches, debounce cancelled");
                }
            }
        }
    }

    /// Start or stop voice input. A transcript replaces the draft.
    pub fn toggle_voice_input(&self) {
        let this = self.clone();
        self.inner.speech.toggle_recognition(move |transcript| {
            this.inner.presenter.set_input(&transcript);
            this.on_input(&transcript);
        });
    }

    /// Re-render the most recent persisted messages. Returns how many.
    pub fn restore_recent(&self) -> usize {
        let recent = lock(&self.inner.history)
            .recent(RESTORE_RECENT_COUNT)
            .to_vec();
        for record in &recent {
            self.inner.presenter.render_message(record);
        }
        recent.len()
    }

    pub fn history(&self) -> Vec<MessageRecord> {
        lock(&self.inner.history).records().to_vec()
    }

    /// Abort every timer this controller has scheduled.
    pub fn cancel_pending(&self) {
        self.inner.crisis_debounce.cancel();
        self.inner.modals.cancel_all();
    }

    async fn exchange(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self.inner.backend.chat(request).await?;
        response.into_reply().map_err(ClientError::Rejected)
    }

    async fn run_command(&self, message: &str, command: &'static ChatCommand, language: Language) {
        tracing::debug!(command = command.name, "Answering local command");
        self.record(MessageRecord::user(message));
        self.clear_input();

        tokio::time::sleep(self.inner.pacing.command_reply_delay).await;

        self.record(MessageRecord::assistant(command.reply));
        self.inner.speech.speak(command.reply, language);
    }

    /// The debounce expired with crisis language still in the draft.
    fn intervene(&self) {
        let inner = &self.inner;
        tracing::warn!("Crisis language in draft, showing supportive message");

        self.record(MessageRecord::assistant(CRISIS_PREVENTION_MESSAGE).with_crisis(true));
        inner
            .speech
            .speak(CRISIS_PREVENTION_MESSAGE, inner.session.language());
        self.schedule_crisis_modal(inner.pacing.prevention_modal_delay);
    }

    fn schedule_crisis_modal(&self, delay: std::time::Duration) {
        let presenter = self.inner.presenter.clone();
        self.inner.modals.spawn(async move {
            tokio::time::sleep(delay).await;
            presenter.show_crisis_modal();
        });
    }

    fn record(&self, record: MessageRecord) {
        self.inner.presenter.render_message(&record);
        lock(&self.inner.history).append(record);
    }

    fn clear_input(&self) {
        self.inner.session.set_draft("");
        self.inner.presenter.set_input("");
        self.inner.presenter.set_send_enabled(false);
    }

    fn finish_exchange(&self) {
        let inner = &self.inner;
        inner.session.end_exchange();
        inner.presenter.set_typing_indicator(false);
        inner.presenter.set_send_enabled(inner.session.can_send());
    }
}

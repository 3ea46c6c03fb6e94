//! Fakes shared by the controller tests.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mindbridge_shared::protocol::{
    ChatRequest, ChatResponse, CheckinRequest, CheckinResponse, SpeakRequest, SpeakResponse,
};
use mindbridge_shared::{Language, MessageRecord};
use mindbridge_store::{KeyValueStore, MemoryStorage};

use crate::app::MindBridge;
use crate::backend::WellnessBackend;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::{Notification, Presenter};
use crate::history::{HistoryView, Insights};
use crate::speech::{SpeechEngine, SpeechError, VoiceSettings};
use crate::state::lock;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Message(MessageRecord),
    Input(String),
    SendEnabled(bool),
    Typing(bool),
    Listening(bool),
    Notify(Notification),
    CrisisModal,
    CheckinBusy(bool),
    CheckinResponse(String),
    CheckinNote(String),
    History(HistoryView),
    Insights(Insights),
    InsightsHidden,
    Language(Language),
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingPresenter {
    fn push(&self, event: UiEvent) {
        lock(&self.events).push(event);
    }

    pub fn events(&self) -> Vec<UiEvent> {
        lock(&self.events).clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<MessageRecord> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn crisis_modals(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == UiEvent::CrisisModal)
            .count()
    }
}

impl Presenter for RecordingPresenter {
    fn render_message(&self, record: &MessageRecord) {
        self.push(UiEvent::Message(record.clone()));
    }

    fn set_input(&self, text: &str) {
        self.push(UiEvent::Input(text.to_string()));
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.push(UiEvent::SendEnabled(enabled));
    }

    fn set_typing_indicator(&self, visible: bool) {
        self.push(UiEvent::Typing(visible));
    }

    fn set_listening(&self, listening: bool) {
        self.push(UiEvent::Listening(listening));
    }

    fn notify(&self, notification: Notification) {
        self.push(UiEvent::Notify(notification));
    }

    fn show_crisis_modal(&self) {
        self.push(UiEvent::CrisisModal);
    }

    fn set_checkin_busy(&self, busy: bool) {
        self.push(UiEvent::CheckinBusy(busy));
    }

    fn show_checkin_response(&self, text: &str) {
        self.push(UiEvent::CheckinResponse(text.to_string()));
    }

    fn set_checkin_note(&self, text: &str) {
        self.push(UiEvent::CheckinNote(text.to_string()));
    }

    fn render_history(&self, view: &HistoryView) {
        self.push(UiEvent::History(view.clone()));
    }

    fn show_insights(&self, insights: &Insights) {
        self.push(UiEvent::Insights(insights.clone()));
    }

    fn hide_insights(&self) {
        self.push(UiEvent::InsightsHidden);
    }

    fn set_language(&self, language: Language) {
        self.push(UiEvent::Language(language));
    }
}

/// Scripted backend that records every request.
#[derive(Default)]
pub struct FakeBackend {
    chat_reply: Mutex<Option<ChatResponse>>,
    chat_fails: AtomicBool,
    checkin_reply: Mutex<Option<CheckinResponse>>,
    checkin_fails: AtomicBool,
    latency: Mutex<Duration>,
    chat_requests: Mutex<Vec<ChatRequest>>,
    checkin_requests: Mutex<Vec<CheckinRequest>>,
    speak_requests: Mutex<Vec<SpeakRequest>>,
}

impl FakeBackend {
    pub fn reply(&self, text: &str, crisis_detected: bool) {
        *lock(&self.chat_reply) = Some(ChatResponse {
            success: true,
            response: Some(text.to_string()),
            crisis_detected: Some(crisis_detected),
            message: None,
        });
    }

    pub fn reject_chat(&self, message: &str) {
        *lock(&self.chat_reply) = Some(ChatResponse {
            success: false,
            message: Some(message.to_string()),
            ..ChatResponse::default()
        });
    }

    pub fn fail_chat(&self) {
        self.chat_fails.store(true, Ordering::SeqCst);
    }

    pub fn checkin_reply(&self, text: &str) {
        *lock(&self.checkin_reply) = Some(CheckinResponse {
            success: true,
            response: Some(text.to_string()),
            ..CheckinResponse::default()
        });
    }

    pub fn fail_checkin(&self) {
        self.checkin_fails.store(true, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        *lock(&self.latency) = latency;
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        lock(&self.chat_requests).clone()
    }

    pub fn checkin_requests(&self) -> Vec<CheckinRequest> {
        lock(&self.checkin_requests).clone()
    }

    pub fn speak_requests(&self) -> Vec<SpeakRequest> {
        lock(&self.speak_requests).clone()
    }

    async fn wait(&self) {
        let latency = *lock(&self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

fn server_error() -> ClientError {
    ClientError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
}

#[async_trait]
impl WellnessBackend for FakeBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        lock(&self.chat_requests).push(request.clone());
        self.wait().await;
        if self.chat_fails.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(lock(&self.chat_reply).clone().unwrap_or(ChatResponse {
            success: true,
            response: Some("I'm here to listen.".to_string()),
            ..ChatResponse::default()
        }))
    }

    async fn checkin(&self, request: &CheckinRequest) -> Result<CheckinResponse> {
        lock(&self.checkin_requests).push(request.clone());
        self.wait().await;
        if self.checkin_fails.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(lock(&self.checkin_reply).clone().unwrap_or(CheckinResponse {
            success: true,
            response: Some("Thanks for checking in.".to_string()),
            ..CheckinResponse::default()
        }))
    }

    async fn speak(&self, request: &SpeakRequest) -> Result<SpeakResponse> {
        lock(&self.speak_requests).push(request.clone());
        Ok(SpeakResponse {
            success: true,
            ..SpeakResponse::default()
        })
    }
}

/// Speech engine that records what it was asked to say.
#[derive(Default)]
pub struct FakeSpeechEngine {
    duration: Mutex<Duration>,
    failure: Option<String>,
    transcript: Option<String>,
    started: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
    voices: Mutex<Vec<VoiceSettings>>,
    locales: Mutex<Vec<String>>,
}

impl FakeSpeechEngine {
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration: Mutex::new(duration),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn hearing(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
            ..Self::default()
        }
    }

    pub fn set_duration(&self, duration: Duration) {
        *lock(&self.duration) = duration;
    }

    pub fn started(&self) -> Vec<String> {
        lock(&self.started).clone()
    }

    pub fn completed(&self) -> Vec<String> {
        lock(&self.completed).clone()
    }

    pub fn voices(&self) -> Vec<VoiceSettings> {
        lock(&self.voices).clone()
    }

    pub fn recognized_locales(&self) -> Vec<String> {
        lock(&self.locales).clone()
    }
}

#[async_trait]
impl SpeechEngine for FakeSpeechEngine {
    fn supports_recognition(&self) -> bool {
        self.transcript.is_some()
    }

    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> std::result::Result<(), SpeechError> {
        lock(&self.started).push(text.to_string());
        lock(&self.voices).push(voice.clone());
        if let Some(message) = &self.failure {
            return Err(SpeechError::Synthesis(message.clone()));
        }
        let duration = *lock(&self.duration);
        tokio::time::sleep(duration).await;
        lock(&self.completed).push(text.to_string());
        Ok(())
    }

    async fn recognize(&self, locale: &str) -> std::result::Result<String, SpeechError> {
        lock(&self.locales).push(locale.to_string());
        let duration = *lock(&self.duration);
        tokio::time::sleep(duration).await;
        self.transcript.clone().ok_or(SpeechError::NoSpeech)
    }
}

/// A fully wired app over fakes and in-memory storage.
pub struct Harness {
    pub app: MindBridge,
    pub backend: Arc<FakeBackend>,
    pub engine: Arc<FakeSpeechEngine>,
    pub presenter: Arc<RecordingPresenter>,
    pub store: Arc<dyn KeyValueStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStorage::new()))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::build(store, FakeSpeechEngine::default())
    }

    pub fn with_engine(engine: FakeSpeechEngine) -> Self {
        Self::build(Arc::new(MemoryStorage::new()), engine)
    }

    fn build(store: Arc<dyn KeyValueStore>, engine: FakeSpeechEngine) -> Self {
        let backend = Arc::new(FakeBackend::default());
        let engine = Arc::new(engine);
        let presenter = Arc::new(RecordingPresenter::default());
        let app = MindBridge::new(
            &ClientConfig::default(),
            store.clone(),
            backend.clone(),
            engine.clone(),
            presenter.clone(),
        );
        Self {
            app,
            backend,
            engine,
            presenter,
            store,
        }
    }
}

impl Deref for Harness {
    type Target = MindBridge;

    fn deref(&self) -> &MindBridge {
        &self.app
    }
}

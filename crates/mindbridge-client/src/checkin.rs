//! Mood check-in controller.

use std::sync::{Arc, Mutex};

use mindbridge_shared::constants::{CHECKIN_FAILURE, CHECKIN_SUCCESS, MISSING_MOOD_WARNING};
use mindbridge_shared::crisis::first_crisis_phrase;
use mindbridge_shared::protocol::CheckinRequest;
use mindbridge_shared::{Language, MoodEntry, MoodValue};
use mindbridge_store::MoodHistory;

use crate::backend::WellnessBackend;
use crate::config::Pacing;
use crate::error::{ClientError, Result};
use crate::events::{Notification, Presenter};
use crate::speech::SpeechBridge;
use crate::state::{lock, Session};
use crate::tasks::TaskSet;

/// Contents of the check-in form at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinForm {
    pub mood: Option<MoodValue>,
    pub note: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    MissingMood,
    Busy,
    Completed {
        response: String,
        crisis_in_note: bool,
    },
    Failed,
}

#[derive(Clone)]
pub struct CheckinController {
    inner: Arc<CheckinInner>,
}

struct CheckinInner {
    backend: Arc<dyn WellnessBackend>,
    presenter: Arc<dyn Presenter>,
    speech: Arc<SpeechBridge>,
    session: Session,
    moods: Mutex<MoodHistory>,
    note: Mutex<String>,
    last_response: Mutex<Option<(String, Language)>>,
    pacing: Pacing,
    deferred: TaskSet,
}

impl CheckinController {
    pub fn new(
        backend: Arc<dyn WellnessBackend>,
        presenter: Arc<dyn Presenter>,
        speech: Arc<SpeechBridge>,
        session: Session,
        moods: MoodHistory,
        pacing: Pacing,
    ) -> Self {
        Self {
            inner: Arc::new(CheckinInner {
                backend,
                presenter,
                speech,
                session,
                moods: Mutex::new(moods),
                note: Mutex::new(String::new()),
                last_response: Mutex::new(None),
                pacing,
                deferred: TaskSet::default(),
            }),
        }
    }

    /// Record a mood picked on the form.
    pub fn select_mood(&self, mood: MoodValue) -> MoodEntry {
        self.inner.session.set_selected_mood(Some(mood));
        lock(&self.inner.moods).track(mood)
    }

    /// Current contents of the note field.
    pub fn note(&self) -> String {
        lock(&self.inner.note).clone()
    }

    pub fn set_note(&self, text: &str) {
        *lock(&self.inner.note) = text.to_string();
        self.inner.presenter.set_checkin_note(text);
    }

    /// Start or stop dictating the note. A transcript replaces the note.
    pub fn toggle_note_dictation(&self) {
        let this = self.clone();
        self.inner.speech.toggle_recognition(move |transcript| {
            this.set_note(&transcript);
        });
    }

    pub async fn submit(&self, form: CheckinForm) -> CheckinOutcome {
        let inner = &self.inner;

        let Some(mood) = form.mood else {
            inner
                .presenter
                .notify(Notification::warning(MISSING_MOOD_WARNING));
            return CheckinOutcome::MissingMood;
        };

        if !inner.session.begin_checkin() {
            return CheckinOutcome::Busy;
        }
        inner.presenter.set_checkin_busy(true);

        let request = CheckinRequest {
            mood,
            note: form.note,
            language: form.language,
        };
        let result = self.send(&request).await;

        inner.session.end_checkin();
        inner.presenter.set_checkin_busy(false);

        match result {
            Ok(response) => {
                inner.presenter.show_checkin_response(&response);
                *lock(&inner.last_response) = Some((response.clone(), request.language));

                let crisis_in_note = match first_crisis_phrase(&request.note) {
                    Some(phrase) => {
                        tracing::warn!(phrase, mood = %mood, "Crisis phrase in check-in note");
                        let presenter = inner.presenter.clone();
                        let delay = inner.pacing.crisis_modal_delay;
                        inner.deferred.spawn(async move {
                            tokio::time::sleep(delay).await;
                            presenter.show_crisis_modal();
                        });
                        true
                    }
                    None => false,
                };

                let speech = inner.speech.clone();
                let delay = inner.pacing.checkin_speak_delay;
                let text = response.clone();
                let language = request.language;
                inner.deferred.spawn(async move {
                    tokio::time::sleep(delay).await;
                    speech.speak(&text, language);
                });

                inner.presenter.notify(Notification::success(CHECKIN_SUCCESS));
                CheckinOutcome::Completed {
                    response,
                    crisis_in_note,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Check-in failed");
                inner.presenter.notify(Notification::error(CHECKIN_FAILURE));
                CheckinOutcome::Failed
            }
        }
    }

    /// Speak the last check-in response again. Returns `false` if there is
    /// none yet.
    pub fn replay_response(&self) -> bool {
        match lock(&self.inner.last_response).clone() {
            Some((text, language)) => {
                self.inner.speech.speak(&text, language);
                true
            }
            None => false,
        }
    }

    pub fn mood_entries(&self) -> Vec<MoodEntry> {
        lock(&self.inner.moods).entries().to_vec()
    }

    pub fn cancel_pending(&self) {
        self.inner.deferred.cancel_all();
    }

    async fn send(&self, request: &CheckinRequest) -> Result<String> {
        let response = self.inner.backend.checkin(request).await?;
        response.into_reply().map_err(ClientError::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NotificationKind;
    use crate::test_support::{FakeSpeechEngine, Harness, UiEvent};
    use std::time::Duration;

    fn form(mood: Option<u8>, note: &str) -> CheckinForm {
        CheckinForm {
            mood: mood.map(|m| MoodValue::new(m).unwrap()),
            note: note.to_string(),
            language: Language::Pt,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_mood_is_rejected() {
        let h = Harness::new();
        let outcome = h.checkin.submit(form(None, "tired")).await;
        assert_eq!(outcome, CheckinOutcome::MissingMood);
        assert!(h.backend.checkin_requests().is_empty());

        let notes = h.presenter.notifications();
        assert_eq!(notes[0].kind, NotificationKind::Warning);
        assert_eq!(notes[0].message, MISSING_MOOD_WARNING);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_checkin() {
        let h = Harness::new();
        h.backend.checkin_reply("Thank you for checking in.");

        let outcome = h.checkin.submit(form(Some(4), "Slept well")).await;
        assert_eq!(
            outcome,
            CheckinOutcome::Completed {
                response: "Thank you for checking in.".into(),
                crisis_in_note: false,
            }
        );

        let requests = h.backend.checkin_requests();
        assert_eq!(requests[0].mood.get(), 4);
        assert_eq!(requests[0].language, Language::Pt);
        assert!(!h.session.is_checkin_busy());

        let events = h.presenter.events();
        assert!(events.contains(&UiEvent::CheckinBusy(true)));
        assert!(events.contains(&UiEvent::CheckinResponse("Thank you for checking in.".into())));
        assert_eq!(h.presenter.notifications()[0].message, CHECKIN_SUCCESS);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(h.engine.started().is_empty());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(h.engine.started(), vec!["Thank you for checking in."]);
        assert_eq!(h.engine.voices()[0].locale, "pt-PT");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(h.presenter.crisis_modals(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crisis_note_schedules_modal() {
        let h = Harness::new();
        h.backend.checkin_reply("You matter.");

        let outcome = h.checkin.submit(form(Some(1), "I feel worthless")).await;
        assert!(matches!(
            outcome,
            CheckinOutcome::Completed { crisis_in_note: true, .. }
        ));

        tokio::time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(h.presenter.crisis_modals(), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(h.presenter.crisis_modals(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_checkin_clears_busy() {
        let h = Harness::new();
        h.backend.fail_checkin();

        let outcome = h.checkin.submit(form(Some(3), "")).await;
        assert_eq!(outcome, CheckinOutcome::Failed);
        assert!(!h.session.is_checkin_busy());
        assert_eq!(h.presenter.events().last(), Some(&UiEvent::Notify(Notification::error(CHECKIN_FAILURE))));
        assert!(!h.checkin.replay_response());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_mood_tracks_history() {
        let h = Harness::new();
        h.checkin.select_mood(MoodValue::new(2).unwrap());
        h.checkin.select_mood(MoodValue::new(5).unwrap());

        assert_eq!(h.session.selected_mood(), Some(MoodValue::new(5).unwrap()));
        let moods: Vec<u8> = h.checkin.mood_entries().iter().map(|e| e.mood.get()).collect();
        assert_eq!(moods, vec![2, 5]);

        let reloaded = Harness::with_store(h.store.clone());
        assert_eq!(reloaded.checkin.mood_entries().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dictation_fills_note() {
        let h = Harness::with_engine(FakeSpeechEngine::hearing("Slept badly, feeling hopeless"));
        h.checkin.toggle_note_dictation();
        assert!(h.session.is_listening());
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(h.checkin.note(), "Slept badly, feeling hopeless");
        assert!(h
            .presenter
            .events()
            .contains(&UiEvent::CheckinNote("Slept badly, feeling hopeless".into())));
        assert!(h.chat.history().is_empty());

        let outcome = h
            .checkin
            .submit(CheckinForm {
                mood: Some(MoodValue::new(2).unwrap()),
                note: h.checkin.note(),
                language: Language::En,
            })
            .await;
        assert!(matches!(
            outcome,
            CheckinOutcome::Completed { crisis_in_note: true, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dictation_unsupported_leaves_note() {
        let h = Harness::new();
        h.checkin.toggle_note_dictation();
        assert!(h.checkin.note().is_empty());
        assert_eq!(
            h.presenter.notifications()[0].message,
            mindbridge_shared::constants::RECOGNITION_UNSUPPORTED
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_response() {
        let h = Harness::new();
        h.backend.checkin_reply("Keep going.");
        h.checkin.submit(form(Some(3), "")).await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(h.checkin.replay_response());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(h.engine.started(), vec!["Keep going.", "Keep going."]);
    }
}

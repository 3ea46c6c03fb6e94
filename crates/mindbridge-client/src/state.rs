//! Per-process session state.
//!
//! [`Session`] is a cheap, cloneable handle around [`SessionState`] shared by
//! the controllers and the tasks they spawn. The lock is only ever held for
//! the duration of an accessor call, never across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mindbridge_shared::{Language, MoodValue};

/// Transient UI flags. Only the language survives a restart, through the
/// stored preference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub language: Language,
    /// A chat exchange is in flight and the typing indicator is visible.
    pub is_typing: bool,
    pub is_listening: bool,
    /// Current contents of the chat input.
    pub draft: String,
    pub selected_mood: Option<MoodValue>,
    pub checkin_busy: bool,
}

#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<Mutex<SessionState>>,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                language,
                ..SessionState::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        lock(&self.inner)
    }

    pub fn language(&self) -> Language {
        self.state().language
    }

    pub fn set_language(&self, language: Language) {
        self.state().language = language;
    }

    pub fn is_typing(&self) -> bool {
        self.state().is_typing
    }

    /// Mark a chat exchange as started. Returns `false` if one is already in
    /// flight.
    pub fn begin_exchange(&self) -> bool {
        let mut state = self.state();
        if state.is_typing {
            return false;
        }
        state.is_typing = true;
        true
    }

    pub fn end_exchange(&self) {
        self.state().is_typing = false;
    }

    pub fn is_listening(&self) -> bool {
        self.state().is_listening
    }

    pub fn set_listening(&self, listening: bool) {
        self.state().is_listening = listening;
    }

    pub fn draft(&self) -> String {
        self.state().draft.clone()
    }

    pub fn set_draft(&self, draft: &str) {
        let mut state = self.state();
        state.draft.clear();
        state.draft.push_str(draft);
    }

    /// Whether the send control should be enabled.
    pub fn can_send(&self) -> bool {
        let state = self.state();
        !state.draft.trim().is_empty() && !state.is_typing
    }

    pub fn selected_mood(&self) -> Option<MoodValue> {
        self.state().selected_mood
    }

    pub fn set_selected_mood(&self, mood: Option<MoodValue>) {
        self.state().selected_mood = mood;
    }

    pub fn is_checkin_busy(&self) -> bool {
        self.state().checkin_busy
    }

    /// Returns `false` if a check-in is already being submitted.
    pub fn begin_checkin(&self) -> bool {
        let mut state = self.state();
        if state.checkin_busy {
            return false;
        }
        state.checkin_busy = true;
        true
    }

    pub fn end_checkin(&self) {
        self.state().checkin_busy = false;
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked. The
/// guarded values here are plain flags and task handles, so a poisoned lock
/// carries no broken invariant.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_guard() {
        let session = Session::default();
        assert!(session.begin_exchange());
        assert!(!session.begin_exchange());
        session.end_exchange();
        assert!(session.begin_exchange());
    }

    #[test]
    fn test_can_send() {
        let session = Session::new(Language::Fr);
        assert!(!session.can_send());

        session.set_draft("   ");
        assert!(!session.can_send());

        session.set_draft("bonjour");
        assert!(session.can_send());

        session.begin_exchange();
        assert!(!session.can_send());
    }

    #[test]
    fn test_clones_share_state() {
        let a = Session::new(Language::En);
        let b = a.clone();
        b.set_language(Language::De);
        b.set_listening(true);
        assert_eq!(a.language(), Language::De);
        assert!(a.is_listening());
    }
}

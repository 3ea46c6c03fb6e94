//! The presentation seam.
//!
//! Controllers never draw anything themselves; every visible effect goes
//! through a [`Presenter`]. Each method corresponds to one hook point of the
//! chat, check-in and history screens.

use std::time::Duration;

use mindbridge_shared::constants::NOTIFICATION_DURATION_MS;
use mindbridge_shared::{Language, MessageRecord};
use serde::Serialize;

use crate::history::{HistoryView, Insights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient toast. A newer notification replaces any visible one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    #[serde(skip)]
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: Duration::from_millis(NOTIFICATION_DURATION_MS),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Warning)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }
}

pub trait Presenter: Send + Sync {
    /// Append a message bubble to the conversation.
    fn render_message(&self, record: &MessageRecord);

    /// Replace the chat input contents (empty string clears it).
    fn set_input(&self, text: &str);

    fn set_send_enabled(&self, enabled: bool);

    fn set_typing_indicator(&self, visible: bool);

    fn set_listening(&self, listening: bool);

    fn notify(&self, notification: Notification);

    /// Blocking overlay with crisis support resources. Dismissal is up to
    /// the front-end.
    fn show_crisis_modal(&self);

    /// Disable the check-in submit control and show its spinner.
    fn set_checkin_busy(&self, busy: bool);

    fn show_checkin_response(&self, text: &str);

    /// Replace the check-in note field, e.g. after dictation.
    fn set_checkin_note(&self, text: &str);

    fn render_history(&self, view: &HistoryView);

    fn show_insights(&self, insights: &Insights);

    fn hide_insights(&self);

    /// Sync every language selector to `language`.
    fn set_language(&self, language: Language);
}

//! Line-oriented [`Presenter`] for the terminal front-end.

use std::io::Write;

use mindbridge_shared::constants::APP_NAME;
use mindbridge_shared::{Language, MessageRecord, Sender};

use crate::events::{Notification, NotificationKind, Presenter};
use crate::history::{HistoryView, Insights};

#[derive(Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    fn line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout leaves nothing useful to report to.
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl Presenter for TerminalPresenter {
    fn render_message(&self, record: &MessageRecord) {
        let who = match record.sender {
            Sender::User => "you",
            Sender::Assistant => APP_NAME,
        };
        let time = record.timestamp.with_timezone(&chrono::Local).format("%H:%M");
        self.line(&format!("[{time}] {who}: {}", record.text));
    }

    fn set_input(&self, text: &str) {
        if !text.is_empty() {
            self.line(&format!("(heard) {text}"));
        }
    }

    fn set_send_enabled(&self, _enabled: bool) {}

    fn set_typing_indicator(&self, visible: bool) {
        if visible {
            self.line(&format!("{APP_NAME} is typing..."));
        }
    }

    fn set_listening(&self, listening: bool) {
        if listening {
            self.line("Listening...");
        }
    }

    fn notify(&self, notification: Notification) {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        };
        self.line(&format!("<{tag}> {}", notification.message));
    }

    fn show_crisis_modal(&self) {
        self.line(
            "\n*** You don't have to go through this alone ***\n\
             Call or text 988 (Suicide & Crisis Lifeline)\n\
             Text HOME to 741741 (Crisis Text Line)\n\
             If you are in immediate danger, call 911.\n",
        );
    }

    fn set_checkin_busy(&self, busy: bool) {
        if busy {
            self.line("Processing...");
        }
    }

    fn show_checkin_response(&self, text: &str) {
        self.line(&format!("{APP_NAME}: {text}"));
    }

    fn set_checkin_note(&self, text: &str) {
        self.line(&format!("(note) {text}"));
    }

    fn render_history(&self, view: &HistoryView) {
        self.line(&format!("== {} ==", view.filter.label()));

        self.line("Check-ins:");
        match view.checkins_empty_state() {
            Some(empty) => self.line(&format!("  {empty}")),
            None => {
                for entry in &view.checkins {
                    self.line(&format!("  {}  mood {}/5", entry.date, entry.mood));
                }
            }
        }

        self.line("Sessions:");
        match view.sessions_empty_state() {
            Some(empty) => self.line(&format!("  {empty}")),
            None => {
                for card in &view.sessions {
                    let marker = if card.crisis { " [crisis support]" } else { "" };
                    let date = card.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M");
                    self.line(&format!("  {date}{marker}  {}", card.text));
                }
            }
        }
    }

    fn show_insights(&self, insights: &Insights) {
        self.line(&format!("== Your Insights ==\n{insights}"));
    }

    fn hide_insights(&self) {}

    fn set_language(&self, language: Language) {
        tracing::debug!(language = %language, "Language selectors updated");
    }
}

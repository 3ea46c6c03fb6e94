//! History browsing and mood insights.
//!
//! Everything here works on structured records: check-in cards are
//! [`MoodEntry`] values and session cards are assistant replies taken from
//! the chat history.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mindbridge_shared::constants::{POSITIVE_MOOD_THRESHOLD, RECENT_WINDOW_DAYS};
use mindbridge_shared::{MessageRecord, MoodEntry, ValidationError};
use serde::Serialize;

use crate::chat::ChatController;
use crate::checkin::CheckinController;
use crate::config::Pacing;
use crate::events::Presenter;
use crate::speech::SpeechBridge;
use crate::state::Session;
use crate::tasks::TaskSlot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    /// Within the last seven days.
    Recent,
    /// Crisis-flagged sessions only. Check-ins never carry the flag.
    Crisis,
    /// Check-ins with mood 4 or 5, plus every session.
    Positive,
}

impl HistoryFilter {
    pub const ALL: [HistoryFilter; 4] = [Self::All, Self::Recent, Self::Crisis, Self::Positive];

    pub fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Recent => "recent",
            Self::Crisis => "crisis",
            Self::Positive => "positive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Sessions",
            Self::Recent => "Recent (7 days)",
            Self::Crisis => "Crisis Support",
            Self::Positive => "Positive Moods",
        }
    }

    fn keeps_checkin(self, entry: &MoodEntry, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Recent => is_recent(entry.timestamp, now),
            Self::Crisis => false,
            Self::Positive => entry.mood.get() >= POSITIVE_MOOD_THRESHOLD,
        }
    }

    fn keeps_session(self, card: &SessionCard, now: DateTime<Utc>) -> bool {
        match self {
            Self::All | Self::Positive => true,
            Self::Recent => is_recent(card.timestamp, now),
            Self::Crisis => card.crisis,
        }
    }
}

impl fmt::Display for HistoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HistoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| ValidationError::UnknownFilter(s.to_string()))
    }
}

fn is_recent(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    timestamp >= now - Duration::days(RECENT_WINDOW_DAYS)
}

/// One past chat exchange, represented by the assistant's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCard {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub crisis: bool,
}

impl SessionCard {
    pub fn from_history(records: &[MessageRecord]) -> Vec<SessionCard> {
        records
            .iter()
            .filter(|r| r.is_assistant())
            .map(|r| SessionCard {
                timestamp: r.timestamp,
                text: r.text.clone(),
                crisis: r.crisis,
            })
            .collect()
    }
}

/// The filtered contents of the history screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    pub filter: HistoryFilter,
    pub checkins: Vec<MoodEntry>,
    pub sessions: Vec<SessionCard>,
}

impl HistoryView {
    pub fn checkins_empty_state(&self) -> Option<String> {
        self.checkins
            .is_empty()
            .then(|| empty_state("check-ins", self.filter))
    }

    pub fn sessions_empty_state(&self) -> Option<String> {
        self.sessions
            .is_empty()
            .then(|| empty_state("sessions", self.filter))
    }
}

fn empty_state(kind: &str, filter: HistoryFilter) -> String {
    format!("No {kind} found. No {kind} match the current filter: \"{filter}\"")
}

pub fn apply_filter(
    filter: HistoryFilter,
    checkins: &[MoodEntry],
    sessions: &[SessionCard],
    now: DateTime<Utc>,
) -> HistoryView {
    HistoryView {
        filter,
        checkins: checkins
            .iter()
            .filter(|e| filter.keeps_checkin(e, now))
            .cloned()
            .collect(),
        sessions: sessions
            .iter()
            .filter(|c| filter.keeps_session(c, now))
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

impl MoodTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Improving => "📈",
            Self::Declining => "📉",
            Self::Stable => "➡️",
        }
    }
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mean(values: &[u8]) -> f64 {
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}

/// Classify `moods`, oldest first. The last three are compared against
/// everything before them.
pub fn calculate_mood_trend(moods: &[u8]) -> MoodTrend {
    if moods.len() < 2 {
        return MoodTrend::Stable;
    }

    let split = moods.len().saturating_sub(3);
    let (earlier, recent) = moods.split_at(split);

    let recent_avg = mean(recent);
    let earlier_avg = if earlier.is_empty() {
        recent_avg
    } else {
        mean(earlier)
    };

    if recent_avg > earlier_avg + 0.5 {
        MoodTrend::Improving
    } else if recent_avg < earlier_avg - 0.5 {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Rounded to one decimal.
    pub average_mood: f64,
    pub total_checkins: usize,
    pub total_sessions: usize,
    pub crisis_sessions: usize,
    pub trend: MoodTrend,
}

/// Summarize the history, or `None` when there are no check-ins yet.
pub fn generate_insights(checkins: &[MoodEntry], sessions: &[SessionCard]) -> Option<Insights> {
    if checkins.is_empty() {
        return None;
    }

    let moods: Vec<u8> = checkins.iter().map(|e| e.mood.get()).collect();
    let average_mood = (mean(&moods) * 10.0).round() / 10.0;

    Some(Insights {
        average_mood,
        total_checkins: checkins.len(),
        total_sessions: sessions.len(),
        crisis_sessions: sessions.iter().filter(|c| c.crisis).count(),
        trend: calculate_mood_trend(&moods),
    })
}

impl fmt::Display for Insights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Mood: {:.1}/5", self.average_mood)?;
        writeln!(f, "Check-ins: {}", self.total_checkins)?;
        writeln!(f, "Chat Sessions: {}", self.total_sessions)?;
        write!(f, "Mood Trend: {} {}", self.trend.emoji(), self.trend)?;
        if self.crisis_sessions > 0 {
            write!(f, "\nCrisis Support Sessions: {}", self.crisis_sessions)?;
        }
        Ok(())
    }
}

/// The history screen.
pub struct HistoryController {
    presenter: Arc<dyn Presenter>,
    chat: ChatController,
    checkin: CheckinController,
    speech: Arc<SpeechBridge>,
    session: Session,
    pacing: Pacing,
    insights_panel: TaskSlot,
}

impl HistoryController {
    pub fn new(
        presenter: Arc<dyn Presenter>,
        chat: ChatController,
        checkin: CheckinController,
        speech: Arc<SpeechBridge>,
        session: Session,
        pacing: Pacing,
    ) -> Self {
        Self {
            presenter,
            chat,
            checkin,
            speech,
            session,
            pacing,
            insights_panel: TaskSlot::new(),
        }
    }

    fn sessions(&self) -> Vec<SessionCard> {
        SessionCard::from_history(&self.chat.history())
    }

    /// Render the history filtered by `filter`.
    pub fn show(&self, filter: HistoryFilter) -> HistoryView {
        let view = apply_filter(
            filter,
            &self.checkin.mood_entries(),
            &self.sessions(),
            Utc::now(),
        );
        tracing::debug!(
            filter = %filter,
            checkins = view.checkins.len(),
            sessions = view.sessions.len(),
            "Rendering history"
        );
        self.presenter.render_history(&view);
        view
    }

    /// Show the insights panel. It hides itself after a while.
    pub fn show_insights(&self) -> Option<Insights> {
        let insights = generate_insights(&self.checkin.mood_entries(), &self.sessions())?;
        self.presenter.show_insights(&insights);

        let presenter = self.presenter.clone();
        let delay = self.pacing.insights_auto_hide;
        self.insights_panel.spawn(async move {
            tokio::time::sleep(delay).await;
            presenter.hide_insights();
        });
        Some(insights)
    }

    pub fn close_insights(&self) {
        self.insights_panel.cancel();
        self.presenter.hide_insights();
    }

    /// Speak a past reply in the current language.
    pub fn read_aloud(&self, card: &SessionCard) {
        self.speech.speak(&card.text, self.session.language());
    }
}

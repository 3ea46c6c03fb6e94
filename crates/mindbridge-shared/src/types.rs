use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    #[serde(alias = "ai")]
    Assistant,
}

/// One turn of chat history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRecord {
    pub sender: Sender,
    #[serde(alias = "message")]
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Set on assistant turns that answered a crisis-flagged exchange.
    #[serde(default, skip_serializing_if = "is_false")]
    pub crisis: bool,
}

impl MessageRecord {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            crisis: false,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    pub fn with_crisis(mut self, crisis: bool) -> Self {
        self.crisis = crisis;
        self
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Self-reported mood on a 1 (very low) to 5 (very good) scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "u8")]
pub struct MoodValue(u8);

impl MoodValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        Self::try_from(value as i64)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Parse the form-field representation ("1".."5").
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::MoodNotANumber(s.to_string()))?;
        Self::try_from(n)
    }
}

impl TryFrom<i64> for MoodValue {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::MoodOutOfRange(value))
        }
    }
}

impl From<MoodValue> for u8 {
    fn from(m: MoodValue) -> Self {
        m.0
    }
}

impl std::fmt::Display for MoodValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single mood selection from the check-in form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub mood: MoodValue,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn now(mood: MoodValue) -> Self {
        let timestamp = Utc::now();
        Self {
            mood,
            date: timestamp.date_naive(),
            timestamp,
        }
    }
}

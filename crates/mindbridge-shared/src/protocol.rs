//! Request and response bodies exchanged with the MindBridge backend.

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::types::MoodValue;

/// Body of `POST /session` (JSON).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub language: Language,
}

/// Reply to `POST /session`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub crisis_detected: Option<bool>,
    /// Server-provided failure reason when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
}

/// A successful chat reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub crisis_detected: bool,
}

impl ChatResponse {
    /// Split the loosely-typed response into a reply or a failure reason.
    pub fn into_reply(self) -> Result<ChatReply, String> {
        if !self.success {
            return Err(self
                .message
                .unwrap_or_else(|| "Failed to get AI response".to_string()));
        }
        match self.response {
            Some(text) => Ok(ChatReply {
                text,
                crisis_detected: self.crisis_detected.unwrap_or(false),
            }),
            None => Err("Response is missing the reply text".to_string()),
        }
    }
}

/// Body of `POST /checkin` (form-urlencoded).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckinRequest {
    pub mood: MoodValue,
    pub note: String,
    pub language: Language,
}

/// Reply to `POST /checkin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinResponse {
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    /// Echo of the submitted mood; the server sends it back as a string.
    #[serde(default)]
    pub mood: Option<serde_json::Value>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CheckinResponse {
    pub fn into_reply(self) -> Result<String, String> {
        if !self.success {
            return Err(self
                .message
                .unwrap_or_else(|| "Failed to process check-in".to_string()));
        }
        self.response
            .ok_or_else(|| "Response is missing the reply text".to_string())
    }
}

/// Body of `POST /api/speak` (JSON). `language` is a speech locale such as
/// `en-US`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeakRequest {
    pub text: String,
    pub language: String,
}

/// Reply to `POST /api/speak`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub audio_file: Option<String>,
}

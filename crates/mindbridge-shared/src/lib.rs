//! # mindbridge-shared
//!
//! Types shared by the MindBridge store and client: the chat and mood data
//! model, the HTTP wire protocol, the crisis keyword matcher, the chat
//! command table, and language/translation tables.

pub mod commands;
pub mod constants;
pub mod crisis;
pub mod error;
pub mod language;
pub mod protocol;
pub mod types;

pub use error::ValidationError;
pub use language::Language;
pub use types::{MessageRecord, MoodEntry, MoodValue, Sender};

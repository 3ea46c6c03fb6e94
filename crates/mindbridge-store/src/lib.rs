//! # mindbridge-store
//!
//! Local key-value persistence for the MindBridge client.
//!
//! A string-keyed contract in the style of a browser's `localStorage`, backed
//! by a small SQLite database. On top of the raw [`KeyValueStore`] the crate
//! provides the typed stores the client uses: chat history (most recent 50
//! messages), mood history (most recent 30 entries) and the language
//! preference.

mod bounded;
pub mod chat_history;
pub mod database;
pub mod migrations;
pub mod mood_history;
pub mod preferences;
pub mod storage;

mod error;

pub use chat_history::ChatHistory;
pub use database::Database;
pub use error::{Result, StoreError};
pub use mood_history::MoodHistory;
pub use preferences::Preferences;
pub use storage::{KeyValueStore, LocalStorage, MemoryStorage};

/// Application name
pub const APP_NAME: &str = "MindBridge";

/// Chat endpoint (JSON POST)
pub const CHAT_ENDPOINT: &str = "/session";

/// Mood check-in endpoint (form-urlencoded POST)
pub const CHECKIN_ENDPOINT: &str = "/checkin";

/// Server-side text-to-speech endpoint (JSON POST)
pub const SPEAK_ENDPOINT: &str = "/api/speak";

/// Default backend base URL (local development server)
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Local storage keys
pub const CHAT_HISTORY_KEY: &str = "mindbridge_chat_history";
pub const MOOD_HISTORY_KEY: &str = "mood_history";
pub const LANGUAGE_KEY: &str = "mindbridge_language";

/// Number of chat messages kept in local storage
pub const MAX_CHAT_HISTORY: usize = 50;

/// Number of mood entries kept in local storage
pub const MAX_MOOD_HISTORY: usize = 30;

/// Number of messages re-rendered when a chat view is restored
pub const RESTORE_RECENT_COUNT: usize = 10;

/// Presentation pacing, in milliseconds
pub const RESPONSE_DELAY_MS: u64 = 1_000;
pub const CRISIS_MODAL_DELAY_MS: u64 = 2_000;
pub const CRISIS_DEBOUNCE_MS: u64 = 2_000;
pub const PREVENTION_MODAL_DELAY_MS: u64 = 3_000;
pub const COMMAND_REPLY_DELAY_MS: u64 = 500;
pub const CHECKIN_SPEAK_DELAY_MS: u64 = 500;
pub const INSIGHTS_AUTO_HIDE_MS: u64 = 10_000;
pub const NOTIFICATION_DURATION_MS: u64 = 4_000;

/// Window used by the "recent" history filter
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Mood at or above which a check-in counts as positive
pub const POSITIVE_MOOD_THRESHOLD: u8 = 4;

/// Speech synthesis voice parameters
pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_PITCH: f32 = 1.0;
pub const SPEECH_VOLUME: f32 = 0.8;

/// Shown in place of an assistant reply when the chat exchange fails
pub const APOLOGY_MESSAGE: &str = "I apologize, but I'm having trouble connecting right now. Please try again in a moment.";

/// Injected by the proactive crisis monitor
pub const CRISIS_PREVENTION_MESSAGE: &str = "I notice you might be going through a difficult time. Remember that you're not alone, and help is available. Would you like to talk about what's troubling you, or would you prefer some immediate support resources?";

/// Toast texts
pub const CHAT_CONNECTION_ERROR: &str = "Connection error. Please try again.";
pub const EMPTY_MESSAGE_WARNING: &str = "Please type a message first";
pub const MISSING_MOOD_WARNING: &str = "Please select your mood level";
pub const CHECKIN_SUCCESS: &str = "Check-in completed successfully!";
pub const CHECKIN_FAILURE: &str = "Failed to process check-in. Please try again.";
pub const RECOGNITION_UNSUPPORTED: &str = "Speech recognition not supported";

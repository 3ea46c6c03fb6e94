//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration against a local development server.

use std::path::PathBuf;
use std::time::Duration;

use mindbridge_shared::constants::*;

/// Delays used purely for presentation pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Between a successful chat reply arriving and it being shown.
    pub response_delay: Duration,
    /// Between a crisis-flagged reply and the crisis modal.
    pub crisis_modal_delay: Duration,
    /// Quiet period after a crisis phrase is typed before intervening.
    pub crisis_debounce: Duration,
    /// Between the supportive message and the crisis modal.
    pub prevention_modal_delay: Duration,
    pub command_reply_delay: Duration,
    pub checkin_speak_delay: Duration,
    pub insights_auto_hide: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(RESPONSE_DELAY_MS),
            crisis_modal_delay: Duration::from_millis(CRISIS_MODAL_DELAY_MS),
            crisis_debounce: Duration::from_millis(CRISIS_DEBOUNCE_MS),
            prevention_modal_delay: Duration::from_millis(PREVENTION_MODAL_DELAY_MS),
            command_reply_delay: Duration::from_millis(COMMAND_REPLY_DELAY_MS),
            checkin_speak_delay: Duration::from_millis(CHECKIN_SPEAK_DELAY_MS),
            insights_auto_hide: Duration::from_millis(INSIGHTS_AUTO_HIDE_MS),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the MindBridge backend.
    /// Env: `MINDBRIDGE_SERVER_URL`
    /// Default: `http://127.0.0.1:5000`
    pub server_url: String,

    /// Directory holding the local storage database.
    /// Env: `MINDBRIDGE_DATA_DIR`
    /// Default: platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Whether replies are read aloud.
    /// Env: `MINDBRIDGE_SPEECH` (true/false)
    /// Default: `true`
    pub speech_enabled: bool,

    /// Per-request HTTP timeout.
    /// Env: `MINDBRIDGE_REQUEST_TIMEOUT_SECS`
    /// Default: `30`
    pub request_timeout: Duration,

    pub pacing: Pacing,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            data_dir: None,
            speech_enabled: true,
            request_timeout: Duration::from_secs(30),
            pacing: Pacing::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("MINDBRIDGE_SERVER_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.starts_with("http://") || url.starts_with("https://") {
                config.server_url = url.to_string();
            } else {
                tracing::warn!(value = %url, "Invalid MINDBRIDGE_SERVER_URL, using default");
            }
        }

        if let Some(dir) = lookup("MINDBRIDGE_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(val) = lookup("MINDBRIDGE_SPEECH") {
            config.speech_enabled = val != "false" && val != "0";
        }

        if let Some(val) = lookup("MINDBRIDGE_REQUEST_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %val, "Invalid MINDBRIDGE_REQUEST_TIMEOUT_SECS, using default"),
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = from_pairs(&[]);
        assert_eq!(config.server_url, "http://127.0.0.1:5000");
        assert!(config.data_dir.is_none());
        assert!(config.speech_enabled);
        assert_eq!(config.pacing.response_delay, Duration::from_millis(1000));
        assert_eq!(config.pacing.crisis_debounce, Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("MINDBRIDGE_SERVER_URL", "https://wellness.example.org/"),
            ("MINDBRIDGE_DATA_DIR", "/tmp/mb"),
            ("MINDBRIDGE_SPEECH", "false"),
            ("MINDBRIDGE_REQUEST_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.server_url, "https://wellness.example.org");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/mb")));
        assert!(!config.speech_enabled);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = from_pairs(&[
            ("MINDBRIDGE_SERVER_URL", "localhost:5000"),
            ("MINDBRIDGE_REQUEST_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}

//! # mindbridge-client
//!
//! Presentation layer of the MindBridge wellness companion: the chat session
//! controller with its crisis monitor, mood check-ins, history browsing with
//! insights, and the speech bridge. Everything user-visible goes through the
//! [`events::Presenter`] trait so the same controllers can drive a terminal or
//! any other front-end.

pub mod app;
pub mod backend;
pub mod chat;
pub mod checkin;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod speech;
pub mod state;
pub mod tasks;
pub mod terminal;

#[cfg(test)]
mod test_support;

pub use app::MindBridge;
pub use config::ClientConfig;
pub use error::{ClientError, Result};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. Logs go to stderr so they do not
/// interleave with the conversation on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("mindbridge=info,mindbridge_client=debug,mindbridge_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

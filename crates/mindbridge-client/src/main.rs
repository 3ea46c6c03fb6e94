//! `mindbridge` terminal front-end.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use mindbridge_client::checkin::CheckinForm;
use mindbridge_client::events::{Notification, Presenter};
use mindbridge_client::history::HistoryFilter;
use mindbridge_client::terminal::TerminalPresenter;
use mindbridge_client::{init_tracing, ClientConfig, MindBridge};
use mindbridge_shared::constants::APP_NAME;
use mindbridge_shared::{Language, MoodValue, ValidationError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const HELP: &str = "\
Type a message and press Enter to chat. Slash commands (/help, /mood,
/breathe, /resources) are answered locally.

  :checkin <1-5> [note]                     mood check-in
  :dictate                                  speak the check-in note
  :history [all|recent|crisis|positive]     browse past check-ins and sessions
  :insights                                 mood summary
  :lang <en|es|fr|de|pt|hi>                 change language
  :voice                                    start or stop voice input
  :listen                                   replay the last check-in response
  :quit                                     exit";

#[derive(Debug, PartialEq)]
enum Input {
    Chat(String),
    Checkin { mood: Option<MoodValue>, note: String },
    History(HistoryFilter),
    Insights,
    Language(Language),
    Voice,
    Dictate,
    Listen,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Input, ValidationError> {
    let Some(rest) = line.trim().strip_prefix(':') else {
        return Ok(Input::Chat(line.to_string()));
    };

    let (command, args) = match rest.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (rest, ""),
    };

    Ok(match command {
        "checkin" => {
            let (mood, note) = match args.split_once(char::is_whitespace) {
                Some((mood, note)) => (mood, note.trim()),
                None => (args, ""),
            };
            let mood = if mood.is_empty() {
                None
            } else {
                Some(MoodValue::parse(mood)?)
            };
            Input::Checkin {
                mood,
                note: note.to_string(),
            }
        }
        "history" if args.is_empty() => Input::History(HistoryFilter::All),
        "history" => Input::History(args.parse()?),
        "insights" => Input::Insights,
        "lang" => Input::Language(Language::from_code(args)?),
        "voice" => Input::Voice,
        "dictate" => Input::Dictate,
        "listen" => Input::Listen,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Help,
    })
}

/// Handle one line. Returns `false` when the user asked to leave.
async fn handle(app: &MindBridge, presenter: &dyn Presenter, line: &str) -> bool {
    let input = match parse_line(line) {
        Ok(input) => input,
        Err(e) => {
            presenter.notify(Notification::warning(e.to_string()));
            return true;
        }
    };

    match input {
        Input::Chat(text) => {
            app.chat.on_input(&text);
            let outcome = app.chat.send_draft().await;
            tracing::debug!(?outcome, "Exchange finished");
        }
        Input::Checkin { mood, note } => {
            if let Some(mood) = mood {
                app.checkin.select_mood(mood);
            }
            let note = if note.is_empty() {
                app.checkin.note()
            } else {
                note
            };
            let form = CheckinForm {
                mood,
                note,
                language: app.language(),
            };
            app.checkin.submit(form).await;
        }
        Input::History(filter) => {
            app.history.show(filter);
        }
        Input::Insights => {
            if app.history.show_insights().is_none() {
                presenter.notify(Notification::info(
                    "No check-ins yet. Try :checkin <1-5> first.",
                ));
            }
        }
        Input::Language(language) => {
            // Failures are already reported through the presenter.
            let _ = app.set_language(language);
        }
        Input::Voice => app.chat.toggle_voice_input(),
        Input::Dictate => app.checkin.toggle_note_dictation(),
        Input::Listen => {
            if !app.checkin.replay_response() {
                presenter.notify(Notification::info("No check-in response yet."));
            }
        }
        Input::Help => println!("{HELP}"),
        Input::Quit => return false,
    }
    true
}

/// How one REPL step ended.
#[derive(Debug, PartialEq)]
enum Step<T> {
    Done(T),
    Interrupted,
}

/// Run `work` unless `interrupt` completes first. The same `interrupt`
/// future is reused across steps so a signal arriving mid-step is not lost.
async fn or_interrupt<T, I>(work: impl Future<Output = T>, interrupt: &mut Pin<&mut I>) -> Step<T>
where
    I: Future,
{
    tokio::select! {
        out = work => Step::Done(out),
        _ = interrupt.as_mut() => Step::Interrupted,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    info!(
        server = %config.server_url,
        speech = config.speech_enabled,
        timeout_secs = config.request_timeout.as_secs(),
        "Loaded configuration"
    );

    let presenter = Arc::new(TerminalPresenter::new());
    let app = MindBridge::connect(&config, presenter.clone())?;

    let restored = app.chat.restore_recent();
    if restored == 0 {
        println!("Welcome to {APP_NAME}. How are you feeling today? (:help for commands)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());

    loop {
        let step = or_interrupt(
            async {
                match lines.next_line().await? {
                    Some(line) => Ok::<_, std::io::Error>(handle(&app, presenter.as_ref(), &line).await),
                    None => Ok(false),
                }
            },
            &mut ctrl_c,
        )
        .await;

        match step {
            Step::Done(Ok(true)) => {}
            Step::Done(Ok(false)) => break,
            Step::Done(Err(e)) => {
                app.shutdown();
                return Err(e.into());
            }
            Step::Interrupted => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    app.shutdown();
    Ok(())
}

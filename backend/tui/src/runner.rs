//! Terminal event loop.

use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::controller::{AnalysisOutcome, OutcomeStatus};
use crate::input::handle_key_event;
use crate::render::draw_ui;

const TICK: Duration = Duration::from_millis(120);

enum Step {
    Terminal(Option<io::Result<Event>>),
    Outcome(Option<AnalysisOutcome>),
    Tick,
}

/// Run the interactive UI until the user quits. The terminal is restored on
/// every exit path, including a panic.
pub async fn run(mut app: App) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    install_panic_hook();

    let result = async {
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to enter alternate screen")?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        info!("TUI started");
        event_loop(&mut terminal, &mut app).await
    }
    .await;

    restore_terminal();
    info!("TUI stopped");
    result
}

/// Leave raw mode and the alternate screen. Best effort: each step runs even
/// if an earlier one failed.
fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        warn!(error = %err, "Failed to disable raw mode");
    }
    if let Err(err) = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show) {
        warn!(error = %err, "Failed to leave alternate screen");
    }
}

/// Restore the terminal when the UI thread panics. Extraction tasks run on
/// runtime worker threads and have their panics caught, so they must not
/// tear the screen down.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if std::thread::current().name() == Some("main") {
            restore_terminal();
        }
        previous(info);
    }));
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = time::interval(TICK);

    while !app.should_quit {
        terminal.draw(|f| draw_ui(f, app))?;

        let step = tokio::select! {
            event = events.next() => Step::Terminal(event),
            outcome = app.controller.recv_outcome() => Step::Outcome(outcome),
            _ = ticker.tick() => Step::Tick,
        };

        match step {
            Step::Terminal(Some(Ok(Event::Key(key)))) => {
                if let Some(command) = handle_key_event(key, app) {
                    app.execute(command).await;
                }
            }
            Step::Terminal(Some(Ok(Event::Paste(text)))) => app.input.push_str(&text),
            Step::Terminal(Some(Ok(_))) => {}
            Step::Terminal(Some(Err(err))) => return Err(err).context("Terminal event error"),
            Step::Terminal(None) => break,
            Step::Outcome(Some(outcome)) => {
                if app.controller.apply_outcome(outcome) == OutcomeStatus::Stale {
                    debug!("Ignored a result from an earlier selection");
                }
            }
            Step::Outcome(None) => {
                warn!("Outcome channel closed");
                break;
            }
            Step::Tick => app.on_tick(),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_is_safe_without_an_active_terminal() {
        restore_terminal();
        restore_terminal();
    }

    #[test]
    fn panic_hook_chains_off_the_ui_thread() {
        install_panic_hook();
        let joined = std::thread::Builder::new()
            .name("worker".into())
            .spawn(|| panic!("worker failure"))
            .unwrap()
            .join();
        assert!(joined.is_err());
    }
}

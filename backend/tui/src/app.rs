//! TUI App State
//!
//! Wraps the [`Controller`] with the terminal-only bits: the path being
//! typed into the picker, the picker notice line, and the spinner.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use textlens_core::SelectError;

use crate::controller::Controller;
use crate::input::Command;

/// One-line message under the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

pub struct App {
    pub controller: Controller,
    pub input: String,
    pub notice: Option<Notice>,
    pub spinner: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            input: String::new(),
            notice: None,
            spinner: 0,
            should_quit: false,
        }
    }

    pub async fn execute(&mut self, command: Command) {
        match command {
            Command::LoadImage(path) => self.load_image(&path).await,
            Command::Analyze => self.analyze(),
        }
    }

    /// Pick an image file. Failures land in the picker notice.
    pub async fn load_image(&mut self, path: &Path) {
        let messages = self.controller.messages();
        self.notice = match self.controller.select_image(path).await {
            Ok(selection) if selection.is_oversized() => {
                Some(Notice::Warning(messages.oversized.to_string()))
            }
            Ok(_) => None,
            Err(SelectError::Unsupported(_)) => {
                Some(Notice::Error(messages.unsupported_type.to_string()))
            }
            Err(SelectError::Io(err)) => {
                warn!(path = %path.display(), error = %err, "Failed to read selected image");
                Some(Notice::Error(messages.read_failed.to_string()))
            }
        };
    }

    /// Start an analysis. Without a selection the controller itself moves
    /// to the failure state; a request while loading is ignored.
    pub fn analyze(&mut self) {
        if let Err(err) = self.controller.start_analysis() {
            debug!(error = %err, "Analyze request not started");
        }
    }

    pub fn on_tick(&mut self) {
        if self.controller.state().is_loading() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }
}

/// Turn what was typed or pasted into the picker into a path.
///
/// Terminals wrap dropped files in quotes and may escape spaces; a leading
/// `~/` expands to the home directory.
pub fn parse_path_input(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);
    let unescaped = unquoted.replace("\\ ", " ");
    if unescaped.is_empty() {
        return None;
    }

    if let Some(rest) = unescaped.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(rest));
        }
    }
    Some(PathBuf::from(unescaped))
}

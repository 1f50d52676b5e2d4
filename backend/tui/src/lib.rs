//! TUI (Terminal User Interface) for textlens.
//!
//! Exposes the analysis [`Controller`], the ratatui shell around it, and the
//! event loop that runs "textlens" interactively.

pub mod app;
pub mod controller;
pub mod input;
pub mod render;
pub mod runner;

pub use app::{App, Notice};
pub use controller::{AnalysisOutcome, Controller, OutcomeStatus};
pub use input::{handle_key_event, Command};
pub use render::draw_ui;
pub use runner::run;

//! Keyboard Input Handler
//!
//! Processes crossterm key events and updates `App`. Anything that needs to
//! await (reading a file, starting an analysis) is returned as a [`Command`]
//! for the event loop to execute.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{parse_path_input, App};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadImage(PathBuf),
    Analyze,
}

/// Handles a single keyboard event.
pub fn handle_key_event(key: KeyEvent, app: &mut App) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            None
        }
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('r') if ctrl => Some(Command::Analyze),
        KeyCode::Char('u') if ctrl => {
            app.input.clear();
            None
        }
        KeyCode::Enter => {
            let typed = std::mem::take(&mut app.input);
            match parse_path_input(&typed) {
                Some(path) => Some(Command::LoadImage(path)),
                None => Some(Command::Analyze),
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
            None
        }
        KeyCode::Char(c) if !ctrl => {
            app.input.push(c);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use async_trait::async_trait;
    use std::sync::Arc;
    use textlens_core::{ExtractError, ImageMime, Locale, TextExtractor};

    struct Never;

    #[async_trait]
    impl TextExtractor for Never {
        fn name(&self) -> &str {
            "never"
        }

        async fn extract(&self, _payload: &[u8], _mime: ImageMime) -> Result<String, ExtractError> {
            Err(ExtractError)
        }
    }

    fn app() -> App {
        App::new(Controller::new(Arc::new(Never), Locale::En))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            assert_eq!(handle_key_event(key(KeyCode::Char(c)), app), None);
        }
    }

    #[test]
    fn enter_with_path_loads_image() {
        let mut app = app();
        type_str(&mut app, "/tmp/a.pngx");
        handle_key_event(key(KeyCode::Backspace), &mut app);

        assert_eq!(
            handle_key_event(key(KeyCode::Enter), &mut app),
            Some(Command::LoadImage(PathBuf::from("/tmp/a.png")))
        );
        assert!(app.input.is_empty());
    }

    #[test]
    fn enter_on_empty_input_analyzes() {
        let mut app = app();
        assert_eq!(handle_key_event(key(KeyCode::Enter), &mut app), Some(Command::Analyze));
        assert_eq!(handle_key_event(ctrl('r'), &mut app), Some(Command::Analyze));
    }

    #[test]
    fn ctrl_u_clears_and_ctrl_chars_are_not_typed() {
        let mut app = app();
        type_str(&mut app, "abc");
        handle_key_event(ctrl('u'), &mut app);
        assert!(app.input.is_empty());

        handle_key_event(ctrl('x'), &mut app);
        assert!(app.input.is_empty());
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        handle_key_event(key(KeyCode::Esc), &mut app);
        assert!(app.should_quit);

        let mut app = self::app();
        handle_key_event(ctrl('c'), &mut app);
        assert!(app.should_quit);
    }
}

//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Actions that need the
//! store come back as a [`Command`] for the main loop to hand to the
//! worker.  Adding a new keybinding is a single match arm in
//! [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in [`crate::ui`]'s status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use newsreel::worker::Command;

use crate::app::App;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char('r') => return Some(app.reload()),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') if app.detail => app.close_detail(),
        KeyCode::Esc => app.quit = true,
        _ if app.detail => {}
        KeyCode::Down | KeyCode::Char('j') => return app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => return app.select_last(),
        KeyCode::Enter | KeyCode::Char('l') => return app.open_selected(),
        _ => {}
    }
    None
}

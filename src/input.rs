//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in the status bar (`ui::draw_status_bar`).

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{App, Section};

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_previous(),
        KeyCode::Char('1') => app.focus(Section::About),
        KeyCode::Char('2') => app.focus(Section::Projects),
        KeyCode::Char('3') => app.focus(Section::Blog),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(now),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(now),
        KeyCode::Right | KeyCode::Char('l') => app.carousel.next(now),
        KeyCode::Left | KeyCode::Char('h') => app.carousel.previous(now),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('m') | KeyCode::Enter => app.load_more(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

//! Keybinding dispatcher for appraise.
//!
//! Translates crossterm `KeyEvent`s into `AppState` calls and returns a
//! `KeyAction` for the event loop. Branches first on `state.mode` so each mode
//! has an isolated handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use appraise_core::types::AuthMode;

use crate::app::{AppState, Mode};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running; the next Render shows the change.
    Continue,
    /// Exit cleanly.
    Quit,
    /// End the session. Needs the database, so the event loop awaits it.
    Logout,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::Browse => handle_browse(key, state),
        Mode::Query => handle_query(key, state),
        Mode::Detail => handle_detail(key, state),
        Mode::Credentials => handle_credentials(key, state),
        Mode::ReviewForm => handle_review_form(key, state),
        Mode::Help => handle_help(key, state),
    }
}

fn handle_browse(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('/') => state.start_query(),
        KeyCode::Char('j') | KeyCode::Down => state.select_next(),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev(),
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('?') => state.open_help(),
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_query(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Enter => state.submit_query(),
        KeyCode::Esc => state.mode = Mode::Browse,
        KeyCode::Backspace => {
            state.query_input.pop();
        }
        KeyCode::Char(c) => state.query_input.push(c),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_detail(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_reviews_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_reviews_up(1),
        KeyCode::Char('l') => state.begin_auth(AuthMode::Login),
        KeyCode::Char('r') => state.begin_auth(AuthMode::Register),
        KeyCode::Char('w') => state.open_review_form(),
        KeyCode::Char('o') if state.coordinator.session().is_authenticated() => {
            return KeyAction::Logout;
        }
        KeyCode::Char('?') => state.open_help(),
        KeyCode::Char('q') | KeyCode::Esc => state.close_detail(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_credentials(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => state.cancel_auth(),
        KeyCode::Tab | KeyCode::BackTab => {
            state.credential_field = state.credential_field.toggle();
        }
        KeyCode::Enter => state.submit_credentials(),
        KeyCode::Char('s') if ctrl => state.submit_credentials(),
        KeyCode::Backspace => state.credential_backspace(),
        KeyCode::Char(c) if !ctrl => state.credential_push(c),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_review_form(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => state.leave_review_form(),
        KeyCode::Tab => state.next_review_field(),
        KeyCode::BackTab => state.prev_review_field(),
        KeyCode::Char('s') if ctrl => state.submit_review_form(),
        KeyCode::Backspace => state.review_backspace(),
        KeyCode::Char(c) if !ctrl => state.review_push(c),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.close_help(),
        _ => {}
    }
    KeyAction::Continue
}

/// Scroll wheel moves the result selection, scrolls reviews in the detail
/// overlay, or scrolls help.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    let down = match mouse.kind {
        MouseEventKind::ScrollDown => true,
        MouseEventKind::ScrollUp => false,
        _ => return KeyAction::Continue,
    };
    match (state.mode, down) {
        (Mode::Browse, true) => state.select_next(),
        (Mode::Browse, false) => state.select_prev(),
        (Mode::Detail, true) => state.scroll_reviews_down(3),
        (Mode::Detail, false) => state.scroll_reviews_up(3),
        (Mode::Help, true) => state.help_scroll = state.help_scroll.saturating_add(3),
        (Mode::Help, false) => state.help_scroll = state.help_scroll.saturating_sub(3),
        _ => {}
    }
    KeyAction::Continue
}

use crate::app::AppState;
use crate::keyboard::OnScreenKeyboard;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

/// Punctuation accepted as input besides letters and digits
pub const SUPPORTED_PUNCTUATION: [char; 5] = [' ', ',', '.', '-', '+'];

/// What a raw terminal event means to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit(char),
    /// Allowed through but has no effect on the session
    Passthrough,
    Start,
    Stop,
    Dismiss,
    Difficulty(i32),
    Quit,
    Ignore,
}

pub fn is_supported(c: char) -> bool {
    c.is_ascii_alphanumeric() || SUPPORTED_PUNCTUATION.contains(&c)
}

pub fn action_for_key(key: KeyEvent, state: AppState, notice_open: bool) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::Ignore,
        };
    }

    match key.code {
        KeyCode::Char(c) if is_supported(c) => Action::Submit(c),
        KeyCode::Char(_) => Action::Ignore,
        KeyCode::Backspace => Action::Passthrough,
        KeyCode::Enter => Action::Start,
        KeyCode::Esc if notice_open => Action::Dismiss,
        KeyCode::Esc if state == AppState::Typing => Action::Stop,
        KeyCode::Esc => Action::Quit,
        KeyCode::Up => Action::Difficulty(1),
        KeyCode::Down => Action::Difficulty(-1),
        KeyCode::PageUp => Action::Difficulty(10),
        KeyCode::PageDown => Action::Difficulty(-10),
        _ => Action::Ignore,
    }
}

/// Clicking an on-screen key types it; shift-click types the upper-case letter
pub fn action_for_mouse(mouse: MouseEvent, keyboard: &OnScreenKeyboard, grid: Rect) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Action::Ignore;
    }

    match keyboard.key_at(grid, mouse.column, mouse.row) {
        Some(handle) => {
            let c = keyboard.key(handle).char;
            if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                Action::Submit(c.to_ascii_uppercase())
            } else {
                Action::Submit(c)
            }
        }
        None => Action::Ignore,
    }
}

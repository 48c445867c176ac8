use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    NextField,
    PrevField,
    Submit,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    ToggleMode,
    Input(char),
    None,
}

/// Maps a key press to an action. While `typing`, every printable key is
/// text, so `q` no longer quits.
pub fn map_key(key: KeyEvent, typing: bool) -> AppAction {
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('t') => AppAction::ToggleMode,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Char('q') if !typing => AppAction::Quit,
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Delete => AppAction::Delete,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

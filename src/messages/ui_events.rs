//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus
    ToggleFocus,
    NewStudent,

    // Table
    SelectPrev,
    SelectNext,
    EditSelected,
    DeleteSelected,
    Refresh,

    // Form editing
    NextField,
    PrevField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    Submit,
    CancelForm,

    // Popups
    ConfirmYes,
    ConfirmNo,
    DismissAlert,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Which half of the screen receives keys
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Focus {
    #[default]
    Table,
    Form,
}

/// Popup currently covering the screen, highest priority first
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Overlay {
    Alert,
    Confirm,
    Help,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, focus: Focus, overlay: Option<Overlay>) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match overlay {
        Some(Overlay::Alert) => return Some(UiEvent::DismissAlert),
        Some(Overlay::Help) => return Some(UiEvent::CloseHelp),
        Some(Overlay::Confirm) => {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Some(UiEvent::ConfirmYes)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(UiEvent::ConfirmNo),
                _ => None,
            };
        }
        None => {}
    }

    match focus {
        Focus::Table => handle_table_keys(key),
        Focus::Form => handle_form_keys(key),
    }
}

fn handle_table_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
        KeyCode::Char('n') => Some(UiEvent::NewStudent),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::ToggleFocus),
        _ => None,
    }
}

fn handle_form_keys(key: KeyEvent) -> Option<UiEvent> {
    // Back to the table, keeping what was typed
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
        return Some(UiEvent::ToggleFocus);
    }
    match key.code {
        KeyCode::Esc => Some(UiEvent::CancelForm),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

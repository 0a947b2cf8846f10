use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    GoPage(u8),    // 1-8
    Refresh,
    Export,
    Search,
    SelectUp,
    SelectDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    Confirm,
    Back,
    CycleTheme,
    ShowHelp,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char(c @ '1'..='8'), _) => Action::GoPage(c as u8 - b'0'),

        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::SelectUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::SelectDown,

        (KeyCode::PageUp,   _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpTop,
        (KeyCode::Char('G'), _) | (KeyCode::End,  _) => Action::JumpBottom,

        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc,   _) => Action::Back,

        (KeyCode::Char('r'), _) => Action::Refresh,
        (KeyCode::Char('e'), _) => Action::Export,
        (KeyCode::Char('/'), _) => Action::Search,
        (KeyCode::Char('t'), _) => Action::CycleTheme,
        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)   => Action::ShowHelp,

        _ => Action::None,
    }
}

/// Edits to the search prompt while it has focus.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptEdit {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
    None,
}

pub fn handle_prompt_key(key: KeyEvent) -> PromptEdit {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => PromptEdit::Cancel,
        (KeyCode::Enter, _)     => PromptEdit::Submit,
        (KeyCode::Backspace, _) => PromptEdit::Backspace,
        (KeyCode::Char(c), _)   => PromptEdit::Insert(c),
        _ => PromptEdit::None,
    }
}

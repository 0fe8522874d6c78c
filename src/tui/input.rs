use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Force-accept the top card
    Accept,
    /// Force-reject the top card
    Reject,
    /// Drag the top card one step left
    DragLeft,
    /// Drag the top card one step right
    DragRight,
    /// Let go of the dragged card
    Release,
    /// Restore the full stack
    Reload,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Like: Right arrow or l
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Accept,
        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Accept,

        // Pass: Left arrow or h
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Reject,
        (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Reject,

        // Dragging
        (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::DragLeft,
        (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::DragRight,
        (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Release,
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::Release,

        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Reload,

        // Help: ? (some terminals report the shift)
        (KeyCode::Char('?'), _) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

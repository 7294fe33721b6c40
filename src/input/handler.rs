use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::keys::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A key the simulation understands went down
    Press(Key),
    /// Leave the host entirely
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Press(Key::ArrowUp),
            KeyCode::Down => KeyAction::Press(Key::ArrowDown),
            KeyCode::Left => KeyAction::Press(Key::ArrowLeft),
            KeyCode::Right => KeyAction::Press(Key::ArrowRight),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Press(Key::ArrowUp),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Press(Key::ArrowDown),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Press(Key::ArrowLeft),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Press(Key::ArrowRight),

            // Start and abort
            KeyCode::Char(' ') => KeyAction::Press(Key::Space),
            KeyCode::Enter => KeyAction::Press(Key::Enter),
            KeyCode::Esc => KeyAction::Press(Key::Escape),

            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(up), KeyAction::Press(Key::ArrowUp));

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(down),
            KeyAction::Press(Key::ArrowDown)
        );

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(left),
            KeyAction::Press(Key::ArrowLeft)
        );

        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(right),
            KeyAction::Press(Key::ArrowRight)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(w), KeyAction::Press(Key::ArrowUp));

        let a_upper = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(a_upper),
            KeyAction::Press(Key::ArrowLeft)
        );
    }

    #[test]
    fn test_start_and_abort_keys() {
        let handler = InputHandler::new();

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(space), KeyAction::Press(Key::Space));

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(enter), KeyAction::Press(Key::Enter));

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), KeyAction::Press(Key::Escape));
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(q), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), KeyAction::None);
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// Movement keys: arrows, WASD and vim-style HJKL
const DIRECTION_KEYS: &[(KeyCode, Direction)] = &[
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::Char('w'), Direction::Up),
    (KeyCode::Char('s'), Direction::Down),
    (KeyCode::Char('a'), Direction::Left),
    (KeyCode::Char('d'), Direction::Right),
    (KeyCode::Char('k'), Direction::Up),
    (KeyCode::Char('j'), Direction::Down),
    (KeyCode::Char('h'), Direction::Left),
    (KeyCode::Char('l'), Direction::Right),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Direction key pressed (or auto-repeated)
    Steer(Direction),
    /// Key released; ends a speed boost
    Release,
    /// Start a new game if none is running
    Start,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Look up the movement direction bound to a key, ignoring case
    pub fn direction_for(code: KeyCode) -> Option<Direction> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        DIRECTION_KEYS
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, dir)| *dir)
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::Release;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Steer(direction);
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Start,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

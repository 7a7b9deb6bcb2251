//! Key mapping from terminal events to game actions.

use crate::types::{Difficulty, Direction, GameAction, Mode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input on the mode selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    /// Choose a mode directly (number keys)
    Select(Mode),
    /// Move the choice up or down the list
    Previous,
    Next,
    /// Start with the chosen mode
    Confirm,
}

/// Menu entries in display order
pub const MENU_MODES: [Mode; 5] = [
    Mode::Classic,
    Mode::Campaign,
    Mode::Endless(Difficulty::Easy),
    Mode::Endless(Difficulty::Normal),
    Mode::Endless(Difficulty::Hard),
];

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::Move(Direction::Right))
        }

        // Session
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => Some(GameAction::Back),

        _ => None,
    }
}

/// Map keyboard input on the mode selection screen.
pub fn handle_menu_key(key: KeyEvent) -> Option<MenuInput> {
    match key.code {
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as u8 - b'1') as usize;
            Some(MenuInput::Select(MENU_MODES[idx]))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(MenuInput::Previous),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(MenuInput::Next),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuInput::Confirm),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

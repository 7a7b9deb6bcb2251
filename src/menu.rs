//! Mode selection state behind the menu screen.

use tracing::warn;

use crate::core::{GameConfig, GameSetup};
use crate::input::{MenuInput, MENU_MODES};
use crate::term::MenuModel;
use crate::types::Mode;

#[derive(Debug, Clone)]
pub struct Menu {
    setup: GameSetup,
    message: Option<String>,
}

impl Menu {
    pub fn new(seed: u32) -> Self {
        Self {
            setup: GameSetup::new(seed),
            message: None,
        }
    }

    pub fn selected(&self) -> Option<Mode> {
        self.setup.selected()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Drop the current choice, e.g. when returning from a game.
    pub fn reset(&mut self) {
        self.setup.clear();
        self.message = None;
    }

    /// Apply one menu input. Returns a config once a game should start.
    pub fn handle(&mut self, input: MenuInput) -> Option<GameConfig> {
        match input {
            MenuInput::Select(mode) => self.choose(mode),
            MenuInput::Previous => {
                let idx = match self.highlighted() {
                    Some(0) | None => MENU_MODES.len() - 1,
                    Some(i) => i - 1,
                };
                self.choose(MENU_MODES[idx]);
            }
            MenuInput::Next => {
                let idx = match self.highlighted() {
                    Some(i) => (i + 1) % MENU_MODES.len(),
                    None => 0,
                };
                self.choose(MENU_MODES[idx]);
            }
            MenuInput::Confirm => match self.setup.config() {
                Ok(config) => {
                    self.message = None;
                    return Some(config);
                }
                Err(err) => {
                    warn!(%err, "start refused");
                    self.message = Some(err.to_string());
                }
            },
        }
        None
    }

    pub fn model(&self) -> MenuModel<'_> {
        MenuModel {
            modes: &MENU_MODES,
            highlighted: self.highlighted(),
            message: self.message(),
        }
    }

    fn choose(&mut self, mode: Mode) {
        self.setup.select(mode);
        self.message = None;
    }

    fn highlighted(&self) -> Option<usize> {
        let mode = self.setup.selected()?;
        MENU_MODES.iter().position(|&m| m == mode)
    }
}

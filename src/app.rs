//! Screen state machine driven by the binary.
//!
//! `App` owns the menu and at most one running session. The binary feeds it
//! key presses and fixed ticks and asks it to render; nothing here touches
//! the terminal, so the whole flow can be exercised from tests.

use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::{GameConfig, GameSnapshot, GameState, MoveOutcome};
use crate::input::{handle_key_event, handle_menu_key, should_quit};
use crate::menu::Menu;
use crate::term::{FrameBuffer, GameView, MenuView, Viewport};
use crate::types::{GameAction, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    menu: Menu,
    game: Option<GameState>,
    snapshot: GameSnapshot,
    base_seed: u32,
    games_started: u32,
    game_view: GameView,
    menu_view: MenuView,
}

impl App {
    /// Build from config; a configured mode skips the menu.
    pub fn new(config: &AppConfig) -> Self {
        let base_seed = config.seed_or_clock();
        let mut app = Self {
            menu: Menu::new(base_seed),
            game: None,
            snapshot: GameSnapshot::default(),
            base_seed,
            games_started: 0,
            game_view: GameView::default(),
            menu_view: MenuView,
        };
        if let Some(mode) = config.mode {
            app.start_game(GameConfig::new(mode, base_seed));
        }
        app
    }

    pub fn screen(&self) -> Screen {
        if self.game.is_some() {
            Screen::Playing
        } else {
            Screen::Menu
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if should_quit(key) {
            info!("quit requested");
            return Control::Quit;
        }

        if self.game.is_none() {
            if let Some(config) = handle_menu_key(key).and_then(|input| self.menu.handle(input)) {
                self.start_game(config);
            }
            return Control::Continue;
        }

        let Some(action) = handle_key_event(key) else {
            return Control::Continue;
        };
        if action == GameAction::Back {
            self.back_to_menu();
            return Control::Continue;
        }
        if let Some(game) = self.game.as_mut() {
            let outcome = game.apply_action(action);
            if action == GameAction::Restart {
                info!(episode = game.episode_id(), "restarted");
            }
            log_outcome(&outcome);
        }
        Control::Continue
    }

    pub fn tick(&mut self, dt_ms: u32) {
        if let Some(game) = self.game.as_mut() {
            game.tick(dt_ms);
        }
    }

    /// Identity of the next frame, for render throttling.
    pub fn frame_key(&mut self) -> u64 {
        match &self.game {
            Some(game) => {
                game.snapshot_into(&mut self.snapshot);
                self.snapshot.fingerprint()
            }
            None => {
                let model = self.menu.model();
                let highlighted = model.highlighted.map_or(0, |i| i as u64 + 1);
                (1 << 63) | ((model.message.is_some() as u64) << 8) | highlighted
            }
        }
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        match &self.game {
            Some(game) => {
                game.snapshot_into(&mut self.snapshot);
                self.game_view.render_into(&self.snapshot, viewport, fb);
            }
            None => self.menu_view.render_into(&self.menu.model(), viewport, fb),
        }
    }

    fn start_game(&mut self, config: GameConfig) {
        // Each game from the same base seed gets its own tile sequence.
        let seed = config.seed.wrapping_add(self.games_started.wrapping_mul(0x9e37_79b9));
        self.games_started = self.games_started.wrapping_add(1);

        let mut game = GameState::new(GameConfig::new(config.mode, seed));
        game.start();
        info!(mode = config.mode.as_str(), seed, size = game.grid().size(), "game started");
        self.game = Some(game);
    }

    fn back_to_menu(&mut self) {
        if let Some(game) = self.game.take() {
            info!(mode = game.mode().as_str(), score = game.score(), "left game");
        }
        self.menu = Menu::new(self.base_seed);
    }
}

fn log_outcome(outcome: &MoveOutcome) {
    for event in &outcome.events {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(err) => {
                debug!(%err, "event not serializable");
                continue;
            }
        };
        match event {
            GameEvent::Merge(_) => debug!(event = %json, "merge"),
            _ => info!(event = %json, "game event"),
        }
    }
}

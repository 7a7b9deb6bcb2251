//! Game state module - manages the complete session
//!
//! This module ties together the grid, the random source, the clock and the
//! scoring. It handles the move-evaluate-spawn cycle, campaign level
//! transitions, game over and restart.
//!
//! There is no global state: a session is a `GameState` value built from a
//! [`GameConfig`], owned by the runner and lent to the input handler and the
//! view in turn.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::clock::GameClock;
use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::rng::{SimpleRng, TileRng};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Session configuration: what to play and how to seed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: Mode,
    pub seed: u32,
}

impl GameConfig {
    pub fn new(mode: Mode, seed: u32) -> Self {
        Self { mode, seed }
    }
}

/// Mode selection ahead of a session
///
/// Starting requires an explicit choice; there is no default mode.
///
/// ```
/// use tui_2048_core::{GameError, GameSetup};
/// use tui_2048_types::Mode;
///
/// let mut setup = GameSetup::new(7);
/// assert_eq!(setup.config(), Err(GameError::NoModeSelected));
///
/// setup.select(Mode::Campaign);
/// assert_eq!(setup.config().unwrap().mode, Mode::Campaign);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSetup {
    mode: Option<Mode>,
    seed: u32,
}

impl GameSetup {
    pub fn new(seed: u32) -> Self {
        Self { mode: None, seed }
    }

    pub fn select(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }

    pub fn clear(&mut self) {
        self.mode = None;
    }

    pub fn selected(&self) -> Option<Mode> {
        self.mode
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Configuration for the selected mode.
    pub fn config(&self) -> Result<GameConfig> {
        let mode = self.mode.ok_or(GameError::NoModeSelected)?;
        Ok(GameConfig::new(mode, self.seed))
    }
}

/// A tile placed by a spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub row: u8,
    pub col: u8,
    pub value: u32,
}

/// What a single action did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Any cell changed value or position
    pub moved: bool,
    /// A merge reached `WIN_TILE` during this move
    pub won: bool,
    pub score_gained: u32,
    /// Tile spawned after the move (None when nothing moved, the grid was
    /// full, or a level transition replaced the grid)
    pub spawned: Option<SpawnedTile>,
    /// Merge, win and lifecycle events in the order they happened
    pub events: ArrayVec<GameEvent, MAX_EVENTS_PER_MOVE>,
}

impl MoveOutcome {
    pub fn merges(&self) -> impl Iterator<Item = &MergeEvent> {
        self.events.iter().filter_map(|ev| match ev {
            GameEvent::Merge(m) => Some(m),
            _ => None,
        })
    }

    pub fn level_completed(&self) -> bool {
        self.events
            .iter()
            .any(|ev| matches!(ev, GameEvent::LevelComplete { .. }))
    }

    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|ev| matches!(ev, GameEvent::GameOver { .. }))
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R: TileRng = SimpleRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    score: u32,
    level: u8,
    status: GameStatus,
    started: bool,
    clock: GameClock,
    /// Time spent in campaign levels already completed this run.
    banked_ms: u64,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    moves: u32,
    last_move: Option<Direction>,
    last_merges: ArrayVec<MergeEvent, MAX_MERGES_PER_MOVE>,
    last_spawn: Option<SpawnedTile>,
    /// Last lifecycle event (level complete, campaign complete, game over).
    last_event: Option<GameEvent>,
}

impl GameState<SimpleRng> {
    /// Create a new session seeded from the config
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, SimpleRng::new(config.seed))
    }
}

impl<R: TileRng> GameState<R> {
    /// Create a new session drawing spawns from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            grid: Grid::blank(config.mode.initial_grid_size()),
            rng,
            score: 0,
            level: 1,
            status: GameStatus::Active,
            started: false,
            clock: GameClock::new(),
            banked_ms: 0,
            episode_id: 0,
            moves: 0,
            last_move: None,
            last_merges: ArrayVec::new(),
            last_spawn: None,
            last_event: None,
        }
    }

    /// Build the first grid, spawn the starting tiles and start the clock
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.begin_grid(self.config.mode.initial_grid_size());
        debug!(
            mode = self.config.mode.as_str(),
            size = self.grid.size(),
            episode = self.episode_id,
            "game started"
        );
    }

    /// Replace the grid with a fresh one and restart the clock.
    fn begin_grid(&mut self, size: u8) {
        self.grid = Grid::blank(size);
        for _ in 0..START_TILES {
            self.spawn_random_tile();
        }
        self.last_spawn = None;
        self.last_merges.clear();
        self.clock.restart();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Elapsed time of the current level (or game outside campaign)
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    /// Elapsed time across all levels of this run
    pub fn total_elapsed_ms(&self) -> u64 {
        self.banked_ms + self.clock.elapsed_ms()
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Replace the grid of a running session (fixtures, replays).
    ///
    /// The new grid must match the current size.
    pub fn load_grid(&mut self, grid: Grid) -> Result<()> {
        if grid.size() != self.grid.size() {
            return Err(GameError::InvalidGridSize(grid.size()));
        }
        self.grid = grid;
        self.last_merges.clear();
        self.last_spawn = None;
        Ok(())
    }

    /// Spawn one tile on a random empty cell; no-op when the grid is full
    pub fn spawn_random_tile(&mut self) -> Option<SpawnedTile> {
        let (row, col, value) = self.grid.spawn_random_tile(&mut self.rng)?;
        let tile = SpawnedTile { row, col, value };
        self.last_spawn = Some(tile);
        Some(tile)
    }

    /// True if no move can change the grid
    pub fn is_terminal(&self) -> bool {
        self.grid.is_terminal()
    }

    /// Advance the clock; never touches the grid
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.started || !self.status.accepts_moves() {
            return;
        }
        self.clock.tick(elapsed_ms);
    }

    /// Apply a game action
    ///
    /// `Back` is handled by the runner (it leaves the session) and is a
    /// no-op here.
    pub fn apply_action(&mut self, action: GameAction) -> MoveOutcome {
        match action {
            GameAction::Move(direction) => self.move_tiles(direction),
            GameAction::Restart => {
                self.restart();
                MoveOutcome::default()
            }
            GameAction::Back => MoveOutcome::default(),
        }
    }

    /// Slide all tiles in `direction`, then spawn and evaluate.
    ///
    /// Ignored (nothing moves, no events) before start and once the game is
    /// over or the campaign is complete.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        if !self.started || !self.status.accepts_moves() {
            return outcome;
        }

        let shift = self.grid.shift(direction);
        if !shift.moved {
            return outcome;
        }

        outcome.moved = true;
        outcome.score_gained = shift.score;
        self.score = self.score.saturating_add(shift.score);
        self.moves = self.moves.wrapping_add(1);
        self.last_move = Some(direction);
        self.last_event = None;
        self.last_spawn = None;
        self.last_merges.clear();

        for &merge in &shift.merges {
            self.last_merges.push(merge);
            outcome.events.push(GameEvent::Merge(merge));
            if merge.value >= WIN_TILE {
                outcome.won = true;
                outcome.events.push(GameEvent::Win { value: merge.value });
            }
        }

        if outcome.won && self.config.mode.is_campaign() {
            self.complete_level(&mut outcome);
            return outcome;
        }

        outcome.spawned = self.spawn_random_tile();

        if self.grid.is_terminal() {
            self.finish_game(&mut outcome);
        }

        outcome
    }

    /// Campaign: bank the level time, advance, and rebuild the grid.
    fn complete_level(&mut self, outcome: &mut MoveOutcome) {
        self.clock.stop();
        let elapsed_ms = self.clock.elapsed_ms();

        let done = GameEvent::LevelComplete {
            level: self.level,
            elapsed_ms,
            score: self.score,
        };
        outcome.events.push(done);
        self.last_event = Some(done);
        debug!(level = self.level, elapsed_ms, score = self.score, "level complete");

        if self.level >= MAX_LEVEL {
            self.status = GameStatus::Completed;
            let total_ms = self.total_elapsed_ms();
            let finished = GameEvent::CampaignComplete {
                score: self.score,
                total_ms,
            };
            outcome.events.push(finished);
            self.last_event = Some(finished);
            debug!(score = self.score, total_ms, "campaign complete");
            return;
        }

        self.banked_ms += elapsed_ms;
        self.level += 1;
        self.begin_grid(level_grid_size(self.level));
    }

    fn finish_game(&mut self, outcome: &mut MoveOutcome) {
        self.status = GameStatus::Over;
        self.clock.stop();

        // Whole run, like `CampaignComplete::total_ms`
        let over = GameEvent::GameOver {
            score: self.score,
            elapsed_ms: self.total_elapsed_ms(),
            level: self.config.mode.is_campaign().then_some(self.level),
        };
        outcome.events.push(over);
        self.last_event = Some(over);
        debug!(score = self.score, level = self.level, "game over");
    }

    /// Start over in the same mode: score, level, grid and clock reset
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.level = 1;
        self.status = GameStatus::Active;
        self.banked_ms = 0;
        self.moves = 0;
        self.last_move = None;
        self.last_event = None;
        self.clock.reset();
        self.started = false;
        self.start();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        let n = self.grid.size() as usize;
        out.size = self.grid.size();
        for (y, row) in self.grid.rows().enumerate() {
            out.cells[y][..n].copy_from_slice(row);
        }
        for m in &self.last_merges {
            out.merged[m.row as usize][m.col as usize] = true;
        }
        out.spawned = self.last_spawn.map(|t| (t.row, t.col));
        out.score = self.score;
        out.best_tile = self.grid.max_tile();
        out.level = self.level;
        out.mode = self.config.mode;
        out.status = self.status;
        out.started = self.started;
        out.elapsed_ms = self.clock.elapsed_ms();
        out.episode_id = self.episode_id;
        out.moves = self.moves;
        out.last_move = self.last_move;
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

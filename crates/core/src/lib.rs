//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the grid engine: the slide-and-merge rules, tile
//! spawning, terminal-state detection and the session lifecycle (levels,
//! restart, game over). It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: The random source is injected through [`TileRng`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Moves and spawns run on fixed-capacity buffers, no allocation
//!
//! # Module Structure
//!
//! - [`line`]: The line algorithm (compact, merge once, compact, pad)
//! - [`grid`]: NxN grid, direction-indexed line extraction, spawn, terminal check
//! - [`game_state`]: Session object: score, level, status, clock, events
//! - [`rng`]: Seeded LCG and the [`TileRng`] injection point
//! - [`clock`]: Elapsed-time accumulator driven by the runner tick
//! - [`snapshot`]: Renderer-facing copy of a session
//! - [`error`]: Errors surfaced to the caller
//!
//! # Game Rules
//!
//! - **Merge once**: a tile produced by a merge never merges again in the same move
//! - **Leading pair first**: merges resolve from the edge the tiles move toward
//! - **Spawn**: after every move that changed the grid, one 2 (90%) or 4 (10%)
//! - **Game over**: no empty cell and no adjacent equal pair
//! - **Campaign**: reaching 2048 advances to the next, smaller grid; score carries over
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameConfig, GameState};
//! use tui_2048_types::{Direction, GameAction, Mode};
//!
//! let mut game = GameState::new(GameConfig::new(Mode::Classic, 12345));
//! game.start();
//! assert_eq!(game.grid().size(), 9);
//! assert_eq!(game.grid().empty_count(), 81 - 2);
//!
//! // Moves report whether anything changed
//! let outcome = game.apply_action(GameAction::Move(Direction::Left));
//! if outcome.moved {
//!     assert!(outcome.spawned.is_some());
//! }
//! ```

pub mod clock;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod line;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use clock::GameClock;
pub use error::{GameError, Result};
pub use game_state::{GameConfig, GameSetup, GameState, MoveOutcome, SpawnedTile};
pub use grid::{Grid, ShiftResult};
pub use line::{process_line, LineResult};
pub use rng::{SimpleRng, TileRng};
pub use snapshot::GameSnapshot;

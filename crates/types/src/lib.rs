//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with serde derives, making them usable in any
//! context (core logic, terminal rendering, structured logging).
//!
//! # Grid Dimensions
//!
//! The grid is always square. Supported sizes:
//!
//! | Mode | Size |
//! |------|------|
//! | Classic | 9x9 |
//! | Campaign level 1..5 | 8x8 down to 4x4 (`9 - level`) |
//! | Endless Easy / Normal / Hard | 8x8 / 6x6 / 4x4 |
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WIN_TILE` | 2048 | Tile value that wins a level (or triggers the win event) |
//! | `START_TILES` | 2 | Tiles spawned on a fresh grid |
//! | `FOUR_TILE_PERCENT` | 10 | Chance that a spawned tile is a 4 |
//! | `MAX_LEVEL` | 5 | Last campaign level |
//! | `TICK_MS` | 16 | Runner loop interval |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Difficulty, Direction, GameAction, Mode};
//!
//! // Parse a direction (case-insensitive)
//! assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
//!
//! // Actions wrap directions
//! assert_eq!(GameAction::from_str("up"), Some(GameAction::Move(Direction::Up)));
//!
//! // Modes decide the starting grid size
//! assert_eq!(Mode::Classic.initial_grid_size(), 9);
//! assert_eq!(Mode::Campaign.initial_grid_size(), 8);
//! assert_eq!(Mode::Endless(Difficulty::Hard).initial_grid_size(), 4);
//! ```

use serde::{Deserialize, Serialize};

/// Smallest supported grid dimension
pub const MIN_GRID_SIZE: u8 = 4;

/// Largest supported grid dimension (classic mode)
pub const MAX_GRID_SIZE: u8 = 9;

/// Capacity of the flat cell storage
pub const MAX_CELLS: usize = (MAX_GRID_SIZE as usize) * (MAX_GRID_SIZE as usize);

/// Grid size of the single-mode classic game
pub const CLASSIC_GRID_SIZE: u8 = 9;

/// Tiles placed on every fresh grid
pub const START_TILES: usize = 2;

/// Winning tile value
pub const WIN_TILE: u32 = 2048;

/// Last campaign level; finishing it completes the campaign
pub const MAX_LEVEL: u8 = 5;

/// Percent chance that a spawned tile is a 4 instead of a 2
pub const FOUR_TILE_PERCENT: u32 = 10;

/// Runner loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Resolution of the elapsed-time display
pub const CLOCK_RESOLUTION_MS: u64 = 1000;

/// Upper bound on merges in a single move (N/2 per line, N lines)
pub const MAX_MERGES_PER_MOVE: usize = (MAX_GRID_SIZE as usize / 2) * MAX_GRID_SIZE as usize;

/// Upper bound on events in a single move: one merge and one win per
/// merge, plus level/game lifecycle events.
pub const MAX_EVENTS_PER_MOVE: usize = MAX_MERGES_PER_MOVE * 2 + 2;

/// Grid size for a campaign level (level 1 → 8x8 … level 5 → 4x4).
///
/// Levels outside `1..=MAX_LEVEL` are clamped.
///
/// ```
/// use tui_2048_types::level_grid_size;
///
/// assert_eq!(level_grid_size(1), 8);
/// assert_eq!(level_grid_size(5), 4);
/// ```
pub fn level_grid_size(level: u8) -> u8 {
    9 - level.clamp(1, MAX_LEVEL)
}


/// Direction of a move
///
/// Tiles slide toward the named edge. Left/Up read each line in natural
/// index order; Right/Down read it reversed, so merges always collapse
/// toward the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("Right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// True for moves that process rows (Left/Right)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when lines are read from the far edge (Right/Down)
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Actions that can be applied to a running session
///
/// Input sources (keyboard today) produce these; the engine is agnostic to
/// where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Slide all tiles in a direction
    Move(Direction),
    /// Start over in the same mode (score and level reset)
    Restart,
    /// Leave the game and return to mode selection
    Back,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("down"), Some(GameAction::Move(Direction::Down)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("undo"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_str(s) {
            return Some(GameAction::Move(direction));
        }
        match s.to_lowercase().as_str() {
            "restart" => Some(GameAction::Restart),
            "back" => Some(GameAction::Back),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(direction) => direction.as_str(),
            GameAction::Restart => "restart",
            GameAction::Back => "back",
        }
    }
}

/// Endless-mode difficulty; smaller grids are harder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn grid_size(&self) -> u8 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Normal => 6,
            Difficulty::Hard => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// Game mode chosen before a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Fixed 9x9 grid, endless play
    Classic,
    /// Five levels of shrinking grids, score carried across levels
    Campaign,
    /// One fixed grid size chosen by difficulty, no levels
    Endless(Difficulty),
}

impl Mode {
    /// Grid size at session start
    pub fn initial_grid_size(&self) -> u8 {
        match self {
            Mode::Classic => CLASSIC_GRID_SIZE,
            Mode::Campaign => level_grid_size(1),
            Mode::Endless(difficulty) => difficulty.grid_size(),
        }
    }

    pub fn is_campaign(&self) -> bool {
        matches!(self, Mode::Campaign)
    }

    /// Parse from the names accepted on the command line and in config.
    ///
    /// Endless modes are addressed by difficulty name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(Mode::Classic),
            "campaign" => Some(Mode::Campaign),
            "easy" => Some(Mode::Endless(Difficulty::Easy)),
            "normal" => Some(Mode::Endless(Difficulty::Normal)),
            "hard" => Some(Mode::Endless(Difficulty::Hard)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Campaign => "campaign",
            Mode::Endless(difficulty) => difficulty.as_str(),
        }
    }

    /// Human-readable label for menus and the side panel
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Classic => "CLASSIC 9x9",
            Mode::Campaign => "CAMPAIGN",
            Mode::Endless(Difficulty::Easy) => "ENDLESS EASY",
            Mode::Endless(Difficulty::Normal) => "ENDLESS NORMAL",
            Mode::Endless(Difficulty::Hard) => "ENDLESS HARD",
        }
    }
}

/// Session status
///
/// "Won" is not a status: reaching the winning tile is reported per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    /// Accepting moves
    Active,
    /// No empty cell and no possible merge; terminal until restart
    Over,
    /// Campaign finished its last level; terminal until restart
    Completed,
}

impl GameStatus {
    pub fn accepts_moves(&self) -> bool {
        matches!(self, GameStatus::Active)
    }
}

/// A single merge: two equal tiles combined into `value` at (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeEvent {
    pub row: u8,
    pub col: u8,
    pub value: u32,
}

/// Events emitted by the engine for the presentation layer
///
/// Audio, banners and logging react to these; nothing feeds back into the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameEvent {
    /// Two tiles merged
    Merge(MergeEvent),
    /// A merge produced a tile at or above `WIN_TILE`
    Win { value: u32 },
    /// Campaign level finished; the next level starts immediately
    #[serde(rename_all = "camelCase")]
    LevelComplete {
        level: u8,
        elapsed_ms: u64,
        score: u32,
    },
    /// Last campaign level finished
    #[serde(rename_all = "camelCase")]
    CampaignComplete { score: u32, total_ms: u64 },
    /// Board is terminal; `level` is set in campaign mode only.
    /// `elapsed_ms` covers the whole run, across campaign levels.
    #[serde(rename_all = "camelCase")]
    GameOver {
        score: u32,
        elapsed_ms: u64,
        level: Option<u8>,
    },
}

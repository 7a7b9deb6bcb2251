//! Error types for session setup.
//!
//! Moves never fail: a move that changes nothing is reported as
//! `moved = false`, not as an error.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("no game mode selected")]
    NoModeSelected,

    #[error("unsupported grid size {0} (expected 4..=9)")]
    InvalidGridSize(u8),

    #[error("grid rows do not form a square of {expected} columns (row {row} has {found})")]
    RaggedRows { row: usize, expected: usize, found: usize },
}

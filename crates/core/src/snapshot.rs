//! Renderer-facing copy of a session.
//!
//! Views read snapshots instead of `GameState` so they stay independent of
//! the random source type and can be built by hand in tests.

use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::types::{Direction, GameEvent, GameStatus, Mode, MAX_GRID_SIZE};

const N: usize = MAX_GRID_SIZE as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    /// Active grid dimension; only `cells[..size][..size]` is meaningful
    pub size: u8,
    pub cells: [[u32; N]; N],
    /// Cells that received a merge result on the last move
    pub merged: [[bool; N]; N],
    /// Cell filled by the last spawn
    pub spawned: Option<(u8, u8)>,
    pub score: u32,
    pub best_tile: u32,
    pub level: u8,
    pub mode: Mode,
    pub status: GameStatus,
    pub started: bool,
    pub elapsed_ms: u64,
    pub episode_id: u32,
    pub moves: u32,
    pub last_move: Option<Direction>,
    /// Most recent lifecycle event (level complete, game over, ...)
    pub last_event: Option<GameEvent>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.started && self.status.accepts_moves()
    }

    /// Whole seconds shown by the timer
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / crate::types::CLOCK_RESOLUTION_MS
    }

    /// FNV-1a hash of everything a view draws, at timer resolution.
    ///
    /// Two snapshots with equal fingerprints render identically, which lets
    /// the runner skip redundant frames.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1aHasher::new();
        let n = self.size as usize;
        self.size.hash(&mut h);
        for row in self.cells.iter().take(n) {
            row[..n].hash(&mut h);
        }
        for row in self.merged.iter().take(n) {
            row[..n].hash(&mut h);
        }
        self.spawned.hash(&mut h);
        self.score.hash(&mut h);
        self.level.hash(&mut h);
        self.mode.hash(&mut h);
        self.status.hash(&mut h);
        self.started.hash(&mut h);
        self.elapsed_secs().hash(&mut h);
        self.last_event.hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            size: MAX_GRID_SIZE,
            cells: [[0; N]; N],
            merged: [[false; N]; N],
            spawned: None,
            score: 0,
            best_tile: 0,
            level: 1,
            mode: Mode::Classic,
            status: GameStatus::Active,
            started: false,
            elapsed_ms: 0,
            episode_id: 0,
            moves: 0,
            last_move: None,
            last_event: None,
        }
    }
}

struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_tracks_visible_state() {
        let a = GameSnapshot::default();
        let mut b = a;
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.cells[0][0] = 2;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_sub_second_time_and_hidden_cells() {
        let mut a = GameSnapshot::default();
        a.size = 4;
        let mut b = a;
        b.elapsed_ms = 999;
        assert_eq!(a.fingerprint(), b.fingerprint());

        // Outside the active 4x4 area.
        b.cells[8][8] = 1024;
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.elapsed_ms = 1000;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_snapshot_serializes() {
        let snap = GameSnapshot::default();
        let v = serde_json::to_value(snap).unwrap();
        assert_eq!(v["size"], 9);
        assert_eq!(v["status"], "active");
        assert_eq!(v["mode"], "classic");
        assert_eq!(v["cells"].as_array().unwrap().len(), 9);
    }
}

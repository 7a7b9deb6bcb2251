//! Elapsed-time clock for a level or game.
//!
//! The runner feeds it fixed ticks; the clock never touches grid state.
//! Start, stop and reset are idempotent so level and game boundaries can
//! call them without checking the current state.

use crate::types::CLOCK_RESOLUTION_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameClock {
    elapsed_ms: u64,
    running: bool,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Zero the elapsed time and stop.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.running = false;
    }

    /// Zero the elapsed time and start counting again.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Advance by `dt_ms` if running
    pub fn tick(&mut self, dt_ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms as u64);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Whole seconds, as displayed
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / CLOCK_RESOLUTION_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_only_counts_while_running() {
        let mut clock = GameClock::new();
        clock.tick(500);
        assert_eq!(clock.elapsed_ms(), 0);

        clock.start();
        clock.tick(1500);
        assert_eq!(clock.elapsed_ms(), 1500);
        assert_eq!(clock.elapsed_secs(), 1);

        clock.stop();
        clock.tick(1000);
        assert_eq!(clock.elapsed_ms(), 1500);
    }

    #[test]
    fn test_clock_boundaries_are_idempotent() {
        let mut clock = GameClock::new();
        clock.start();
        clock.start();
        clock.tick(16);
        clock.stop();
        clock.stop();
        assert_eq!(clock.elapsed_ms(), 16);

        clock.restart();
        clock.restart();
        assert!(clock.is_running());
        assert_eq!(clock.elapsed_ms(), 0);

        clock.reset();
        assert!(!clock.is_running());
    }
}

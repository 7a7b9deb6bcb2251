//! Runtime configuration from environment variables.
//!
//! - `TUI_2048_SEED`: tile RNG seed (u32). Defaults to a clock-derived value.
//! - `TUI_2048_MODE`: `classic|campaign|easy|normal|hard`. Skips the menu.
//! - `TUI_2048_LOG`: tracing filter directive (e.g. `debug`). Logging is off
//!   when unset; output goes to stderr.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::types::Mode;

pub const SEED_VAR: &str = "TUI_2048_SEED";
pub const MODE_VAR: &str = "TUI_2048_MODE";
pub const LOG_VAR: &str = "TUI_2048_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub seed: Option<u32>,
    pub mode: Option<Mode>,
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = non_empty(SEED_VAR).and_then(|s| match s.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(var = SEED_VAR, value = %s, "ignoring invalid seed");
                None
            }
        });

        let mode = non_empty(MODE_VAR).and_then(|s| {
            let mode = Mode::from_str(&s);
            if mode.is_none() {
                warn!(var = MODE_VAR, value = %s, "ignoring unknown mode");
            }
            mode
        });

        Self {
            seed,
            mode,
            log_filter: non_empty(LOG_VAR),
        }
    }

    /// Configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework beyond the
//! key event type. It maps `crossterm` key events into
//! [`crate::types::GameAction`] during play and into [`MenuInput`] on the
//! mode selection screen. The engine never sees where a direction came from.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, handle_menu_key, should_quit, MenuInput, MENU_MODES};

//! Terminal 2048 (workspace facade crate).
//!
//! The engine, input mapping and terminal views live in dedicated crates
//! under `crates/`; this package re-exports them as
//! `tui_2048::{core,input,term,types}` and adds the runner pieces the binary
//! wires together.

pub mod app;
pub mod config;
pub mod menu;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

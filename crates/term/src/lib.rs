//! Terminal front end for the 2048 engine.
//!
//! Views render a `GameSnapshot` (or the mode menu) into a plain framebuffer,
//! and `TerminalRenderer` flushes that framebuffer with crossterm, writing
//! only the cells that changed since the last frame.
//!
//! Views are pure and can be tested without a terminal.

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod palette;
pub mod render_throttle;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use menu_view::{MenuModel, MenuView};
pub use palette::{text_color, tile_color};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

//! MenuView: the mode selection screen.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{draw_border, Viewport};
use crate::palette::{tile_style, DARK_TEXT};
use crate::types::Mode;

/// Everything the menu screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuModel<'a> {
    pub modes: &'a [Mode],
    /// Row of the chosen mode; nothing is chosen until the player picks one
    pub highlighted: Option<usize>,
    /// Error or hint line shown under the list
    pub message: Option<&'a str>,
}

const TITLE: &str = " 2 0 4 8 ";
const MENU_W: u16 = 32;

#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    pub fn render_into(&self, model: &MenuModel<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let rows = model.modes.len() as u16;
        let frame_h = rows + 8;
        let x = viewport.width.saturating_sub(MENU_W) / 2;
        let y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        draw_border(fb, x, y, MENU_W, frame_h, border);

        let title_x = x + (MENU_W.saturating_sub(TITLE.len() as u16)) / 2;
        fb.put_str(title_x, y + 1, TITLE, tile_style(2048, true));

        let normal = CellStyle::default();
        let cursor = CellStyle {
            fg: DARK_TEXT,
            bg: Rgb::new(238, 228, 218),
            bold: true,
            dim: false,
        };

        for (i, mode) in model.modes.iter().enumerate() {
            let row_y = y + 3 + i as u16;
            let chosen = model.highlighted == Some(i);
            let style = if chosen { cursor } else { normal };
            fb.fill_rect(x + 2, row_y, MENU_W - 4, 1, ' ', style);
            fb.put_char(x + 3, row_y, if chosen { '>' } else { ' ' }, style);
            fb.put_u32(x + 4, row_y, i as u32 + 1, style);
            fb.put_str(x + 7, row_y, mode.label(), style);
        }

        let hint = CellStyle {
            dim: true,
            ..normal
        };
        let foot_y = y + 4 + rows;
        fb.put_str(x + 3, foot_y, "1-5 pick  enter start", hint);
        fb.put_str(x + 3, foot_y + 1, "q quit", hint);

        if let Some(msg) = model.message {
            let err = CellStyle {
                fg: Rgb::new(246, 94, 59),
                bold: true,
                ..normal
            };
            fb.put_str(x + 3, foot_y + 2, msg, err);
        }
    }

    pub fn render(&self, model: &MenuModel<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(model, viewport, &mut fb);
        fb
    }
}

//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{decimal_digits, CellStyle, FrameBuffer, Rgb};
use crate::palette::{tile_style, BOARD_BG, EMPTY_BG};
use crate::types::{GameEvent, GameStatus, MAX_LEVEL, WIN_TILE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PANEL_W: u16 = 22;

/// Board renderer for the tile grid plus a status panel.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Preferred tile height; collapses to one row when the board would not fit.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 6 columns fit "2048" with padding; 3 rows keep tiles roughly square.
        Self {
            cell_w: 6,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Tile height actually used for a board of `size` in `viewport`.
    pub fn fitted_cell_h(&self, size: u8, viewport: Viewport) -> u16 {
        let needed = (size as u16) * self.cell_h + 2;
        if needed <= viewport.height {
            self.cell_h
        } else {
            1
        }
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let cell_h = self.fitted_cell_h(snap.size, viewport);
        let n = snap.size as u16;
        let board_px_w = n * self.cell_w;
        let board_px_h = n * cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let total_w = frame_w + 2 + PANEL_W;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: BOARD_BG,
            bold: false,
            dim: false,
        };
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let geom = Geometry {
            origin_x: start_x + 1,
            origin_y: start_y + 1,
            cell_w: self.cell_w,
            cell_h,
        };
        for row in 0..snap.size as usize {
            for col in 0..snap.size as usize {
                let value = snap.cells[row][col];
                let highlight = snap.merged[row][col];
                geom.draw_tile(fb, row as u16, col as u16, value, highlight);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        match snap.status {
            GameStatus::Over => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            }
            GameStatus::Completed => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "CAMPAIGN COMPLETE");
            }
            GameStatus::Active => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let hint = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, snap.mode.label(), label);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.best_tile, value);
        y = y.saturating_add(2);

        if snap.mode.is_campaign() {
            fb.put_str(panel_x, y, "LEVEL", label);
            y = y.saturating_add(1);
            let w = fb.put_u32(panel_x, y, snap.level as u32, value);
            fb.put_char(panel_x + w, y, '/', value);
            fb.put_u32(panel_x + w + 1, y, MAX_LEVEL as u32, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        put_clock(fb, panel_x, y, snap.elapsed_secs(), value);
        y = y.saturating_add(2);

        if let Some(banner) = banner(snap) {
            let style = CellStyle {
                fg: Rgb::hex("#edc22e"),
                ..label
            };
            fb.put_str(panel_x, y, banner, style);
            if let Some(GameEvent::LevelComplete { level, .. }) = snap.last_event {
                fb.put_u32(panel_x + banner.len() as u16, y, level as u32, style);
            }
            y = y.saturating_add(2);
        }

        for line in ["arrows/wasd move", "r restart", "b menu  q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }
}

/// Short status line for the most recent lifecycle event.
fn banner(snap: &GameSnapshot) -> Option<&'static str> {
    match snap.last_event {
        Some(GameEvent::LevelComplete { .. }) if snap.status == GameStatus::Active => {
            Some("CLEARED LEVEL ")
        }
        Some(GameEvent::CampaignComplete { .. }) => Some("ALL LEVELS CLEARED"),
        _ if !snap.mode.is_campaign() && snap.best_tile >= WIN_TILE => Some("2048 REACHED"),
        _ => None,
    }
}

struct Geometry {
    origin_x: u16,
    origin_y: u16,
    cell_w: u16,
    cell_h: u16,
}

impl Geometry {
    fn draw_tile(&self, fb: &mut FrameBuffer, row: u16, col: u16, value: u32, highlight: bool) {
        let px = self.origin_x + col * self.cell_w;
        let py = self.origin_y + row * self.cell_h;

        if value == 0 {
            let style = CellStyle {
                fg: BOARD_BG,
                bg: EMPTY_BG,
                bold: false,
                dim: false,
            };
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
            return;
        }

        let style = tile_style(value, highlight);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let mut digits = [0u8; 20];
        let len = decimal_digits(value as u64, &mut digits) as u16;
        let text_x = px + self.cell_w.saturating_sub(len) / 2;
        let text_y = py + self.cell_h / 2;
        for (i, &d) in digits[..len as usize].iter().enumerate() {
            let x = text_x + i as u16;
            if x >= px + self.cell_w {
                break;
            }
            fb.put_char(x, text_y, (b'0' + d) as char, style);
        }
    }
}

fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, secs: u64, style: CellStyle) {
    let minutes = secs / 60;
    let seconds = secs % 60;
    let mut cx = x;
    if minutes < 10 {
        fb.put_char(cx, y, '0', style);
        cx += 1;
    }
    cx += fb.put_u64(cx, y, minutes, style);
    fb.put_char(cx, y, ':', style);
    cx += 1;
    fb.put_char(cx, y, (b'0' + (seconds / 10) as u8) as char, style);
    fb.put_char(cx + 1, y, (b'0' + (seconds % 10) as u8) as char, style);
}

pub(crate) fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16 + 2;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(0, 0, 0),
        bold: true,
        dim: false,
    };
    fb.put_char(x, mid_y, ' ', style);
    fb.put_str(x + 1, mid_y, text, style);
    fb.put_char(x + text_w - 1, mid_y, ' ', style);
}

//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame and every size change are full redraws; everything else
//! writes only the runs of cells that differ from the previous frame. Board
//! tiles are wide runs of one style, so styles are emitted only when they
//! change between cells.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; None forces a full redraw
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo `enter`. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        reset_style(&mut self.out)?;
        self.out
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints everything (terminal resized or screen switched).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then swap it with the previously shown frame.
    ///
    /// The caller keeps passing the same buffer back each frame, so the two
    /// frames trade places without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut shown = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.out)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full repaint of `fb` into `out`, one run per row.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        pen.write_run(out, fb, 0, y, fb.width())?;
    }
    reset_style(out)
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Frames of different sizes are repainted in full.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }
    let mut pen = Pen::default();
    for y in 0..next.height() {
        for (x, len) in changed_runs(prev, next, y) {
            pen.write_run(out, next, x, y, len)?;
        }
    }
    reset_style(out)
}

/// Tracks the terminal's current style so unchanged attributes are skipped.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn write_run(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x.saturating_add(len) {
            let cell = fb.get(cx, y).unwrap_or_default();
            self.set_style(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        if prev == Some(style) {
            return Ok(());
        }
        // Bold and dim can only be cleared by a full attribute reset, which
        // also drops the colors.
        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb(style.bg)))?;
        }
        Ok(())
    }
}

fn reset_style(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// `(x, len)` of each maximal run of differing cells in row `y`.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer, y: u16) -> impl Iterator<Item = (u16, u16)> + 'a {
    let w = next.width();
    let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < w && !differs(x) {
            x += 1;
        }
        if x >= w {
            return None;
        }
        let start = x;
        while x < w && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_diff(prev: &FrameBuffer, next: &FrameBuffer) -> String {
        let mut out = Vec::new();
        encode_diff_into(prev, next, &mut out).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn full_frame_contains_every_glyph() {
        let mut fb = FrameBuffer::new(4, 2);
        let style = CellStyle::default();
        fb.put_str(0, 0, "2048", style);
        fb.put_str(0, 1, "  16", style);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("2048"));
        assert!(text.contains("16"));
    }

    #[test]
    fn changed_cells_coalesce_into_runs() {
        let a = FrameBuffer::new(8, 2);
        let mut b = a.clone();
        b.put_str(1, 0, "128", CellStyle::default());
        b.put_char(7, 0, '2', CellStyle::default());
        b.put_str(0, 1, "64", CellStyle::default());

        assert_eq!(changed_runs(&a, &b, 0).collect::<Vec<_>>(), vec![(1, 3), (7, 1)]);
        assert_eq!(changed_runs(&a, &b, 1).collect::<Vec<_>>(), vec![(0, 2)]);
        assert_eq!(changed_runs(&a, &a, 0).count(), 0);
    }

    #[test]
    fn identical_frames_write_no_cells() {
        let mut a = FrameBuffer::new(6, 3);
        a.put_str(1, 1, "512", CellStyle::default());
        let text = encoded_diff(&a, &a.clone());
        assert!(!text.contains("512"));
    }

    #[test]
    fn style_is_emitted_once_per_tile_run() {
        let tile = CellStyle {
            fg: Rgb::new(249, 246, 242),
            bg: Rgb::new(242, 177, 121),
            bold: false,
            dim: false,
        };
        let a = FrameBuffer::new(6, 1);
        let mut b = a.clone();
        b.fill_rect(0, 0, 6, 1, ' ', tile);
        b.put_char(3, 0, '8', tile);

        let mut one = Vec::new();
        one.queue(SetBackgroundColor(rgb(tile.bg))).unwrap();
        let needle = String::from_utf8_lossy(&one).into_owned();

        assert_eq!(encoded_diff(&a, &b).matches(needle.as_str()).count(), 1);
    }
}

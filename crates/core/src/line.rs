//! Line module - the slide-and-merge rule for a single row or column
//!
//! A line is oriented so that tiles travel toward index 0. Processing is:
//!
//! 1. Compact: drop empty cells, keep order
//! 2. Merge adjacent equal pairs leading-to-trailing in one pass; a tile
//!    produced by a merge does not merge again
//! 3. Compact again
//! 4. Pad with empty cells back to the input length
//!
//! Everything runs on stack buffers sized for the largest grid.

use arrayvec::ArrayVec;

use crate::types::{MAX_GRID_SIZE, WIN_TILE};

/// Longest line on any supported grid
pub const MAX_LINE: usize = MAX_GRID_SIZE as usize;

/// A processed line
pub type Line = ArrayVec<u32, MAX_LINE>;

/// Result of processing one line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineResult {
    /// Output line, same length as the input
    pub line: Line,
    /// Sum of all merge results
    pub score: u32,
    /// `(index in output line, merged value)` in merge order
    pub merges: ArrayVec<(usize, u32), { MAX_LINE / 2 }>,
}

impl LineResult {
    /// True if any merge reached the winning value
    pub fn won(&self) -> bool {
        self.merges.iter().any(|&(_, value)| value >= WIN_TILE)
    }
}

/// Slide and merge a line toward index 0.
///
/// # Panics
///
/// Panics if `line` is longer than [`MAX_LINE`] (the side of the largest grid).
///
/// # Examples
///
/// ```
/// use tui_2048_core::process_line;
///
/// let result = process_line(&[2, 0, 2, 2]);
/// assert_eq!(result.line.as_slice(), &[4, 2, 0, 0]);
/// assert_eq!(result.score, 4);
/// ```
pub fn process_line(line: &[u32]) -> LineResult {
    assert!(
        line.len() <= MAX_LINE,
        "line of {} cells is longer than the largest grid ({MAX_LINE})",
        line.len()
    );
    let width = line.len();

    let mut tiles: Line = line.iter().copied().filter(|&v| v != 0).collect();
    let mut out = LineResult::default();

    // `pos` counts surviving tiles, which is where a merge result lands
    // after the second compaction.
    let len = tiles.len();
    let mut pos = 0;
    for i in 0..len {
        if tiles[i] == 0 {
            continue;
        }
        if i + 1 < len && tiles[i] == tiles[i + 1] {
            tiles[i] *= 2;
            tiles[i + 1] = 0;
            out.score = out.score.saturating_add(tiles[i]);
            out.merges.push((pos, tiles[i]));
        }
        pos += 1;
    }

    out.line = tiles.into_iter().filter(|&v| v != 0).collect();
    while out.line.len() < width {
        out.line.push(0);
    }
    out
}

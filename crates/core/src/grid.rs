//! Grid module - the NxN tile grid
//!
//! The grid is square with N in 4..=9. Cells hold tile values (0 = empty).
//! Uses a flat, fixed-capacity array so grids of every size share one type
//! and no move or spawn allocates.
//! Coordinates: (row, col), row 0 at the top, col 0 at the left.
//!
//! Every move goes through one mapping, [`Grid::read_line`] /
//! [`Grid::write_line`], that orients a row or column so the direction of
//! travel points at index 0. The merge rule itself lives in [`crate::line`].

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::{GameError, Result};
use crate::line::{process_line, Line};
use crate::rng::{spawn_value, TileRng};
use crate::types::{Direction, MergeEvent, MAX_CELLS, MAX_GRID_SIZE, MAX_MERGES_PER_MOVE, MIN_GRID_SIZE};

/// Outcome of sliding the whole grid in one direction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShiftResult {
    /// Any cell changed value or position
    pub moved: bool,
    /// Sum of all merge results
    pub score: u32,
    /// Merges in line order, each at the cell holding the merged tile
    pub merges: ArrayVec<MergeEvent, MAX_MERGES_PER_MOVE>,
}

/// Square tile grid, row-major flat storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: u8,
    cells: [u32; MAX_CELLS],
}

impl Grid {
    /// Create an empty grid of the given size
    pub fn new(size: u8) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(GameError::InvalidGridSize(size));
        }
        Ok(Self::blank(size))
    }

    /// Empty grid for a size the caller already knows is supported.
    pub(crate) fn blank(size: u8) -> Self {
        debug_assert!((MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size));
        Self {
            size: size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            cells: [0; MAX_CELLS],
        }
    }

    /// Build a grid from rows (mostly for tests and fixtures)
    ///
    /// ```
    /// use tui_2048_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]).unwrap();
    /// assert_eq!(grid.get(3, 3), Some(4));
    /// ```
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let size = u8::try_from(rows.len()).unwrap_or(u8::MAX);
        let mut grid = Self::new(size)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != rows.len() {
                return Err(GameError::RaggedRows {
                    row: y,
                    expected: rows.len(),
                    found: row.len(),
                });
            }
            let start = y * rows.len();
            grid.cells[start..start + row.len()].copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: u8, col: u8) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some((row as usize) * (self.size as usize) + (col as usize))
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: u8, col: u8) -> Option<u32> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); false if out of bounds
    pub fn set(&mut self, row: u8, col: u8, value: u32) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Cells in row-major order (`size * size` entries)
    pub fn cells(&self) -> &[u32] {
        let n = self.size as usize;
        &self.cells[..n * n]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells().chunks(self.size as usize)
    }

    /// Convert to 2D vector for tests and display
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells().iter().filter(|&&v| v == 0).count()
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> ArrayVec<(u8, u8), MAX_CELLS> {
        let n = self.size as usize;
        self.cells()
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(i, _)| ((i / n) as u8, (i % n) as u8))
            .collect()
    }

    /// Largest tile on the grid (0 when empty)
    pub fn max_tile(&self) -> u32 {
        self.cells().iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn sum(&self) -> u64 {
        self.cells().iter().map(|&v| v as u64).sum()
    }

    /// Clear every cell, keeping the size
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// (row, col) of position `pos` along line `line`, with `pos` 0 at the
    /// edge the tiles move toward.
    #[inline(always)]
    fn line_coords(&self, direction: Direction, line: u8, pos: u8) -> (u8, u8) {
        let far = self.size - 1 - pos;
        match direction {
            Direction::Left => (line, pos),
            Direction::Right => (line, far),
            Direction::Up => (pos, line),
            Direction::Down => (far, line),
        }
    }

    /// Read a row (Left/Right) or column (Up/Down), oriented toward the move
    pub fn read_line(&self, direction: Direction, line: u8) -> Line {
        (0..self.size)
            .map(|pos| {
                let (row, col) = self.line_coords(direction, line, pos);
                self.get(row, col).unwrap_or(0)
            })
            .collect()
    }

    /// Write back a line produced for `direction` through the same mapping
    pub fn write_line(&mut self, direction: Direction, line: u8, values: &[u32]) {
        for (pos, &value) in values.iter().take(self.size as usize).enumerate() {
            let (row, col) = self.line_coords(direction, line, pos as u8);
            self.set(row, col, value);
        }
    }

    /// Slide and merge every line in `direction`.
    ///
    /// Lines whose content is unchanged are not written back, and
    /// `moved` is false only if no line changed.
    pub fn shift(&mut self, direction: Direction) -> ShiftResult {
        let mut result = ShiftResult::default();

        for line in 0..self.size {
            let before = self.read_line(direction, line);
            let processed = process_line(&before);
            if processed.line == before {
                continue;
            }

            self.write_line(direction, line, &processed.line);
            result.moved = true;
            result.score = result.score.saturating_add(processed.score);
            for &(pos, value) in &processed.merges {
                let (row, col) = self.line_coords(direction, line, pos as u8);
                result.merges.push(MergeEvent { row, col, value });
            }
        }

        result
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns `(row, col, value)`, or None when the grid is full.
    pub fn spawn_random_tile<R: TileRng + ?Sized>(&mut self, rng: &mut R) -> Option<(u8, u8, u32)> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[rng.next_range(empty.len() as u32) as usize];
        let value = spawn_value(rng);
        self.set(row, col, value);
        Some((row, col, value))
    }

    /// True if no empty cell exists and no adjacent pair is equal.
    ///
    /// Each cell is compared with its right and bottom neighbor only, so
    /// every adjacent pair is checked exactly once.
    pub fn is_terminal(&self) -> bool {
        if self.cells().contains(&0) {
            return false;
        }

        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let value = self.get(row, col);
                if col + 1 < n && self.get(row, col + 1) == value {
                    return false;
                }
                if row + 1 < n && self.get(row + 1, col) == value {
                    return false;
                }
            }
        }

        true
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for row in self.rows() {
            for (i, &value) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                if value == 0 {
                    write!(f, "{:>width$}", ".", width = width)?;
                } else {
                    write!(f, "{:>width$}", value, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 3), Some(3));
        assert_eq!(grid.index(1, 0), Some(4));
        assert_eq!(grid.index(3, 3), Some(15));
        assert_eq!(grid.index(4, 0), None);
        assert_eq!(grid.index(0, 4), None);
    }

    #[test]
    fn test_grid_rejects_unsupported_sizes() {
        assert_eq!(Grid::new(3), Err(GameError::InvalidGridSize(3)));
        assert_eq!(Grid::new(10), Err(GameError::InvalidGridSize(10)));
        assert!(Grid::new(4).is_ok());
        assert!(Grid::new(9).is_ok());
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows = vec![vec![0; 4], vec![0; 4], vec![0; 3], vec![0; 4]];
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GameError::RaggedRows {
                row: 2,
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_line_mapping_orients_toward_move() {
        let grid = Grid::from_rows(&[
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 16],
        ])
        .unwrap();

        assert_eq!(grid.read_line(Direction::Left, 1).as_slice(), &[5, 6, 7, 8]);
        assert_eq!(grid.read_line(Direction::Right, 1).as_slice(), &[8, 7, 6, 5]);
        assert_eq!(grid.read_line(Direction::Up, 2).as_slice(), &[3, 7, 11, 15]);
        assert_eq!(grid.read_line(Direction::Down, 2).as_slice(), &[15, 11, 7, 3]);
    }

    #[test]
    fn test_write_line_inverts_read_line() {
        let original = Grid::from_rows(&[
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 16],
        ])
        .unwrap();

        for direction in Direction::ALL {
            let mut grid = original;
            for line in 0..4 {
                let values = original.read_line(direction, line);
                grid.write_line(direction, line, &values);
            }
            assert_eq!(grid, original, "{:?}", direction);
        }
    }

    #[test]
    fn test_shift_right_merges_toward_right_edge() {
        let mut grid = Grid::from_rows(&[[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let result = grid.shift(Direction::Right);

        assert!(result.moved);
        assert_eq!(grid.to_rows()[0], vec![0, 0, 2, 4]);
        assert_eq!(
            result.merges.as_slice(),
            &[MergeEvent {
                row: 0,
                col: 3,
                value: 4
            }]
        );
    }

    #[test]
    fn test_shift_down_merges_toward_bottom() {
        let mut grid = Grid::from_rows(&[[4, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0], [0; 4]]).unwrap();
        let result = grid.shift(Direction::Down);

        assert_eq!(result.score, 8);
        assert_eq!(
            grid.to_rows(),
            vec![vec![0; 4], vec![0; 4], vec![4, 0, 0, 0], vec![8, 0, 0, 0]]
        );
        assert_eq!(result.merges[0], MergeEvent { row: 3, col: 0, value: 8 });
    }

    #[test]
    fn test_spawn_fills_empty_cell() {
        let mut grid = Grid::new(4).unwrap();
        let mut rng = SimpleRng::new(3);

        let (row, col, value) = grid.spawn_random_tile(&mut rng).unwrap();
        assert_eq!(grid.get(row, col), Some(value));
        assert!(value == 2 || value == 4);
        assert_eq!(grid.empty_count(), 15);
    }

    #[test]
    fn test_terminal_checks_both_axes() {
        let packed = Grid::from_rows(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).unwrap();
        assert!(packed.is_terminal());

        // Vertical pair in the last column.
        let vertical = Grid::from_rows(&[[2, 4, 2, 4], [4, 2, 4, 8], [2, 4, 2, 8], [4, 2, 4, 2]]).unwrap();
        assert!(!vertical.is_terminal());

        // Horizontal pair in the last row.
        let horizontal = Grid::from_rows(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]]).unwrap();
        assert!(!horizontal.is_terminal());
    }

    #[test]
    fn test_display_aligns_columns() {
        let grid = Grid::from_rows(&[[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 128]]).unwrap();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  2   .   .   .");
        assert_eq!(lines[3], "  .   .   . 128");
    }
}

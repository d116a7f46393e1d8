//! Board module - manages the game grid
//!
//! The board is a 10x10 grid where each cell is either empty or occupied with a color.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..9 (top to bottom), col ranges 0..9 (left to right)
//!
//! Full rows and columns are never cleared implicitly: [`Board::detect_full_lines`]
//! reports them and [`Board::clear_lines`] resets them, so a caller can show the
//! completed lines before they disappear.

use std::fmt;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::shape::Shape;
use crate::types::{Cell, Color, EngineError, BOARD_CELLS, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Rows and columns that became full after one placement
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ClearEvent {
    /// Full row indices, ascending
    pub rows: ArrayVec<u8, SIZE>,
    /// Full column indices, ascending
    pub cols: ArrayVec<u8, SIZE>,
}

impl ClearEvent {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Number of distinct line clears (rows plus columns)
    pub fn line_count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    /// Whether the cell lies on one of the cleared lines
    pub fn covers(&self, row: u8, col: u8) -> bool {
        self.rows.contains(&row) || self.cols.contains(&col)
    }
}

/// The game board - 10 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (row, col); None when out of bounds
    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= SIZE as i32 || col < 0 || col >= SIZE as i32 {
            return None;
        }
        Some(row as usize * SIZE + col as usize)
    }

    /// Side length of the grid
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Whether `shape` fits with its top-left corner at (row, col).
    ///
    /// The whole bounding box must lie on the grid, even where the mask is empty,
    /// and every filled mask cell must land on an empty board cell. Any origin is
    /// accepted; out-of-range ones simply return false.
    pub fn can_place(&self, shape: &Shape, row: i32, col: i32) -> bool {
        if row < 0
            || col < 0
            || row + shape.rows() as i32 > SIZE as i32
            || col + shape.cols() as i32 > SIZE as i32
        {
            return false;
        }

        shape
            .cells()
            .all(|(dr, dc)| self.is_free(row + dr as i32, col + dc as i32))
    }

    /// Paint every filled mask cell of `shape` at (row, col) with `color`.
    ///
    /// The placement must be legal (see [`Board::can_place`]); otherwise nothing is
    /// written and `InvariantViolation` is returned.
    pub fn commit(
        &mut self,
        shape: &Shape,
        color: Color,
        row: i32,
        col: i32,
    ) -> Result<(), EngineError> {
        if !self.can_place(shape, row, col) {
            return Err(EngineError::InvariantViolation(
                "commit without a legal placement",
            ));
        }

        for (dr, dc) in shape.cells() {
            self.set(row + dr as i32, col + dc as i32, Some(color));
        }
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= SIZE {
            return false;
        }
        let start = row * SIZE;
        self.cells[start..start + SIZE].iter().all(|cell| cell.is_some())
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: usize) -> bool {
        if col >= SIZE {
            return false;
        }
        (0..SIZE).all(|row| self.cells[row * SIZE + col].is_some())
    }

    /// Scan the whole grid for full rows and full columns.
    ///
    /// Rows and columns are checked independently, so one placement can report
    /// several of each.
    pub fn detect_full_lines(&self) -> ClearEvent {
        let mut event = ClearEvent::default();
        for i in 0..SIZE {
            if self.is_row_full(i) {
                event.rows.push(i as u8);
            }
            if self.is_col_full(i) {
                event.cols.push(i as u8);
            }
        }
        event
    }

    /// Reset every cell of the listed rows and columns to empty.
    ///
    /// Idempotent: intersections and repeated calls are harmless. Out-of-range
    /// indices are ignored. Returns how many cells went from occupied to empty.
    pub fn clear_lines(&mut self, rows: &[u8], cols: &[u8]) -> usize {
        let mut cleared = 0;

        for &row in rows.iter().filter(|&&r| (r as usize) < SIZE) {
            let start = row as usize * SIZE;
            for cell in &mut self.cells[start..start + SIZE] {
                if cell.take().is_some() {
                    cleared += 1;
                }
            }
        }

        for &col in cols.iter().filter(|&&c| (c as usize) < SIZE) {
            for row in 0..SIZE {
                if self.cells[row * SIZE + col as usize].take().is_some() {
                    cleared += 1;
                }
            }
        }

        cleared
    }

    /// Clear the lines of a [`ClearEvent`]
    pub fn apply_clear(&mut self, event: &ClearEvent) -> usize {
        self.clear_lines(&event.rows, &event.cols)
    }

    /// First legal origin for `shape`, scanning rows then columns
    pub fn first_fit(&self, shape: &Shape) -> Option<(u8, u8)> {
        self.legal_origins(shape).next()
    }

    /// All legal origins for `shape` in row-major order
    pub fn legal_origins<'a>(&'a self, shape: &'a Shape) -> impl Iterator<Item = (u8, u8)> + 'a {
        let max_row = GRID_SIZE.saturating_sub(shape.rows());
        let max_col = GRID_SIZE.saturating_sub(shape.cols());
        (0..=max_row)
            .flat_map(move |r| (0..=max_col).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.can_place(shape, r as i32, c as i32))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write color codes (0 = empty, see [`Color::code`]) into a fixed grid
    pub fn write_u8_grid(&self, out: &mut [[u8; SIZE]; SIZE]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.cells[row * SIZE + col].map_or(0, |color| color.code());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_CELLS];
    }

    /// Build a board from a color code grid (inverse of [`Board::write_u8_grid`]).
    /// Unknown codes are treated as empty.
    pub fn from_u8_grid(grid: &[[u8; SIZE]; SIZE]) -> Self {
        let mut board = Self::new();
        for (row, codes) in grid.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                board.cells[row * SIZE + col] = Color::from_code(code);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// One text line per row: `#` occupied, `.` empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let ch = if self.cells[row * SIZE + col].is_some() {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
            if row + 1 < SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::catalog_shape;

    fn shape(name: &str) -> Shape {
        catalog_shape(name).unwrap()
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 9), Some(9));
        assert_eq!(Board::index(1, 0), Some(10));
        assert_eq!(Board::index(9, 9), Some(99));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, 10), None);
        assert_eq!(Board::index(10, 0), None);
    }

    #[test]
    fn test_can_place_ignores_empty_mask_cells_inside_box() {
        let mut board = Board::new();
        // The empty corner of `corner_top_left` sits on an occupied cell.
        board.set(1, 1, Some(Color::Red));
        assert!(board.can_place(&shape("corner_top_left"), 0, 0));
        assert!(!board.can_place(&shape("square2"), 0, 0));
    }

    #[test]
    fn test_can_place_requires_whole_box_on_grid() {
        let board = Board::new();
        // Only the right column of `diagonal_up` row 0 is filled, but the box still counts.
        assert!(!board.can_place(&shape("diagonal_up"), 0, 9));
        assert!(board.can_place(&shape("diagonal_up"), 8, 8));
        assert!(!board.can_place(&shape("diagonal_up"), 9, 8));
        assert!(!board.can_place(&shape("single"), -1, 0));
    }

    #[test]
    fn test_commit_rejects_illegal_without_writing() {
        let mut board = Board::new();
        board.set(0, 1, Some(Color::Blue));
        let before = board.clone();

        let err = board
            .commit(&shape("line3_horizontal"), Color::Red, 0, 0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_detect_rows_and_cols_together() {
        let mut board = Board::new();
        for i in 0..10 {
            board.set(2, i, Some(Color::Green));
            board.set(i, 7, Some(Color::Green));
        }
        let event = board.detect_full_lines();
        assert_eq!(event.rows.as_slice(), &[2]);
        assert_eq!(event.cols.as_slice(), &[7]);
        assert_eq!(event.line_count(), 2);
        assert!(event.covers(2, 0));
        assert!(event.covers(5, 7));
        assert!(!event.covers(5, 6));
    }

    #[test]
    fn test_clear_lines_counts_intersection_once() {
        let mut board = Board::new();
        for i in 0..10 {
            board.set(4, i, Some(Color::Cyan));
            board.set(i, 4, Some(Color::Cyan));
        }
        assert_eq!(board.occupied_count(), 19);
        assert_eq!(board.clear_lines(&[4], &[4]), 19);
        assert!(board.is_empty());
        assert_eq!(board.clear_lines(&[4], &[4]), 0);
    }

    #[test]
    fn test_clear_lines_ignores_out_of_range() {
        let mut board = Board::new();
        board.set(0, 0, Some(Color::Red));
        assert_eq!(board.clear_lines(&[10, 200], &[11]), 0);
        assert!(board.is_occupied(0, 0));
    }

    #[test]
    fn test_u8_grid_roundtrip() {
        let mut board = Board::new();
        board.set(3, 4, Some(Color::Yellow));
        board.set(9, 0, Some(Color::Magenta));

        let mut grid = [[0u8; SIZE]; SIZE];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[3][4], Color::Yellow.code());
        assert_eq!(grid[9][0], Color::Magenta.code());
        assert_eq!(Board::from_u8_grid(&grid), board);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(0, 0, Some(Color::Red));
        board.set(9, 9, Some(Color::Red));
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "#.........");
        assert_eq!(lines[9], ".........#");
    }
}

//! Shape module - polyomino masks and the fixed shape catalog
//!
//! A shape is an immutable rectangular boolean mask. Offsets are `(row, col)`
//! relative to the top-left corner of the shape's bounding box, which is also
//! the origin passed to [`Board::can_place`](crate::Board::can_place).
//!
//! Shapes are plain `Copy` values compared by value, so any number of pieces can
//! carry the same shape without sharing state.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::rng::RandomSource;
use crate::types::{Color, MAX_SHAPE_DIM};

/// Offset of a single filled cell relative to the shape origin: `(row, col)`
pub type CellOffset = (u8, u8);

type Mask = [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

/// Errors from building a shape out of caller-supplied rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("shape has no rows or no columns")]
    Empty,
    #[error("shape row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },
    #[error("shape is {rows}x{cols}, larger than the maximum bounding box")]
    TooLarge { rows: usize, cols: usize },
    #[error("shape has no filled cell")]
    NoFilledCell,
}

/// Immutable polyomino mask with its bounding box
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    mask: Mask,
}

impl Shape {
    /// Build a shape from `0`/`1` rows at compile time.
    ///
    /// Panics (a compile error in const context) on an invalid mask; use
    /// [`Shape::new`] for data that is not known to be valid.
    pub const fn from_bits(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        assert!(height > 0 && height <= MAX_SHAPE_DIM, "bad shape height");
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_DIM, "bad shape width");

        let mut mask = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut filled = false;
        let mut r = 0;
        while r < height {
            assert!(rows[r].len() == width, "ragged shape");
            let mut c = 0;
            while c < width {
                if rows[r][c] != 0 {
                    mask[r][c] = true;
                    filled = true;
                }
                c += 1;
            }
            r += 1;
        }
        assert!(filled, "shape has no filled cell");

        Self {
            rows: height as u8,
            cols: width as u8,
            mask,
        }
    }

    /// Build a shape from boolean rows, validating the mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfit_core::Shape;
    ///
    /// let l = Shape::new(&[&[true, false], &[true, true]]).unwrap();
    /// assert_eq!((l.rows(), l.cols()), (2, 2));
    /// assert_eq!(l.cell_count(), 3);
    /// assert!(Shape::new(&[&[false]]).is_err());
    /// ```
    pub fn new(rows: &[&[bool]]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ShapeError::Ragged {
                row,
                len: r.len(),
                expected: width,
            });
        }
        if height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return Err(ShapeError::TooLarge {
                rows: height,
                cols: width,
            });
        }

        let mut mask = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            mask[r][..width].copy_from_slice(row);
        }
        if !mask.iter().flatten().any(|&filled| filled) {
            return Err(ShapeError::NoFilledCell);
        }

        Ok(Self {
            rows: height as u8,
            cols: width as u8,
            mask,
        })
    }

    /// Bounding box height
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Bounding box width
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the mask cell at `(row, col)` is filled. Outside the box is empty.
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.mask[row as usize][col as usize]
    }

    /// Filled cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.mask[r as usize][c as usize])
                .map(move |c| (r, c))
        })
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> usize {
        self.mask.iter().flatten().filter(|&&filled| filled).count()
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shape({}x{} ", self.rows, self.cols)?;
        for r in 0..self.rows as usize {
            if r > 0 {
                f.write_str("/")?;
            }
            for c in 0..self.cols as usize {
                f.write_str(if self.mask[r][c] { "#" } else { "." })?;
            }
        }
        f.write_str(")")
    }
}

impl Serialize for Shape {
    /// Serialized as rows of booleans, trimmed to the bounding box.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows as usize))?;
        for row in self.mask.iter().take(self.rows as usize) {
            seq.serialize_element(&row[..self.cols as usize])?;
        }
        seq.end()
    }
}

/// A catalog shape with a stable name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedShape {
    pub name: &'static str,
    pub shape: Shape,
}

const fn named(name: &'static str, rows: &[&[u8]]) -> NamedShape {
    NamedShape {
        name,
        shape: Shape::from_bits(rows),
    }
}

/// The 19 shapes pieces are drawn from (uniformly).
pub const CATALOG: [NamedShape; 19] = [
    named("corner_top_left", &[&[1, 1], &[1, 0]]),
    named("corner_bottom_right", &[&[0, 1], &[1, 1]]),
    named("j", &[&[0, 1], &[0, 1], &[1, 1]]),
    named("l_flipped", &[&[1, 1], &[0, 1], &[0, 1]]),
    named("j_flipped", &[&[1, 1], &[1, 0], &[1, 0]]),
    named("l", &[&[1, 0], &[1, 0], &[1, 1]]),
    named("line3_horizontal", &[&[1, 1, 1]]),
    named("square2", &[&[1, 1], &[1, 1]]),
    named("t", &[&[0, 1, 0], &[1, 1, 1]]),
    named("square3", &[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]),
    named("rect2x3", &[&[1, 1, 1], &[1, 1, 1]]),
    named("corner_bottom_left", &[&[1, 0], &[1, 1]]),
    named("j_flat", &[&[1, 1, 1], &[0, 0, 1]]),
    named("l_flat", &[&[1, 1, 1], &[1, 0, 0]]),
    named("domino_horizontal", &[&[1, 1]]),
    named("diagonal_up", &[&[0, 1], &[1, 0]]),
    named("diagonal_down", &[&[1, 0], &[0, 1]]),
    named("line3_vertical", &[&[1], &[1], &[1]]),
    named("single", &[&[1]]),
];

/// Look up a catalog shape by name
pub fn catalog_shape(name: &str) -> Option<Shape> {
    CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.shape)
}

/// Uniform draw from [`CATALOG`]
pub fn pick_random_shape<R: RandomSource + ?Sized>(rng: &mut R) -> Shape {
    CATALOG[rng.next_index(CATALOG.len())].shape
}

/// Uniform draw from [`Color::PALETTE`]
pub fn pick_random_color<R: RandomSource + ?Sized>(rng: &mut R) -> Color {
    Color::PALETTE[rng.next_index(Color::PALETTE.len())]
}

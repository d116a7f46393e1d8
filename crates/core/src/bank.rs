//! Piece bank - the three pieces currently offered to the player
//!
//! The bank hands out pieces in batches of [`BANK_SIZE`]. A piece stays in its
//! slot after it is placed (marked consumed), so slot positions remain stable
//! for the presentation layer. The whole bank is replaced only when every slot
//! is consumed.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::rng::RandomSource;
use crate::shape::{pick_random_color, pick_random_shape, Shape};
use crate::types::{Color, EngineError, PieceId, BANK_SIZE};

/// Whether a piece can still be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceStatus {
    Active,
    Consumed,
}

/// A shape offered to the player, with its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub id: PieceId,
    pub shape: Shape,
    pub color: Color,
    pub status: PieceStatus,
}

impl Piece {
    pub fn is_active(&self) -> bool {
        self.status == PieceStatus::Active
    }
}

/// Fixed-size set of offered pieces
#[derive(Debug, Clone, Default)]
pub struct PieceBank {
    slots: ArrayVec<Piece, BANK_SIZE>,
    /// Next id to hand out; never reset, so stale ids stay invalid.
    next_id: u32,
}

impl PieceBank {
    /// Create an empty bank (no slots until the first refill)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every slot with a fresh active piece.
    ///
    /// Each piece is an independent draw: shape first, then color.
    pub fn refill<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.slots.clear();
        for _ in 0..BANK_SIZE {
            let shape = pick_random_shape(rng);
            let color = pick_random_color(rng);
            self.push(shape, color);
        }
    }

    /// Replace every slot with the given pieces, in order
    pub fn fill_with(&mut self, pieces: [(Shape, Color); BANK_SIZE]) {
        self.slots.clear();
        for (shape, color) in pieces {
            self.push(shape, color);
        }
    }

    fn push(&mut self, shape: Shape, color: Color) {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.slots.push(Piece {
            id,
            shape,
            color,
            status: PieceStatus::Active,
        });
    }

    /// Flip an active piece to consumed.
    ///
    /// Fails with `InvalidReference` when the id is unknown or already consumed.
    pub fn mark_consumed(&mut self, id: PieceId) -> Result<(), EngineError> {
        let piece = self
            .slots
            .iter_mut()
            .find(|p| p.id == id && p.is_active())
            .ok_or(EngineError::InvalidReference(id))?;
        piece.status = PieceStatus::Consumed;
        Ok(())
    }

    /// True iff no slot holds an active piece
    pub fn all_consumed(&self) -> bool {
        !self.slots.iter().any(Piece::is_active)
    }

    /// Active pieces in slot order
    pub fn active_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.slots.iter().filter(|p| p.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_pieces().count()
    }

    /// Look up an active piece by id
    pub fn active(&self, id: PieceId) -> Option<&Piece> {
        self.active_pieces().find(|p| p.id == id)
    }

    /// All slots, consumed ones included
    pub fn slots(&self) -> &[Piece] {
        &self.slots
    }
}

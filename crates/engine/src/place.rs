use crate::core::{Board, GameEngine, Piece, PlacementOutcome, RandomSource};
use crate::types::{EngineError, PieceId, GRID_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("game is not accepting placements")]
    NotPlayable,
    #[error("no active piece fits anywhere")]
    NoPlacement,
    #[error("engine rejected the chosen placement: {0}")]
    Rejected(#[from] EngineError),
}

impl PlanError {
    pub fn code(self) -> &'static str {
        match self {
            PlanError::NotPlayable => "not_playable",
            PlanError::NoPlacement => "no_placement",
            PlanError::Rejected(err) => err.code(),
        }
    }
}

/// A legal placement and how good it looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub piece: PieceId,
    pub row: u8,
    pub col: u8,
    /// Rows plus columns this placement would complete
    pub lines: usize,
    /// Piece cell edges touching occupied cells or the grid border
    pub contact: usize,
}

impl Candidate {
    fn rank(&self) -> (usize, usize) {
        (self.lines, self.contact)
    }
}

fn evaluate(board: &Board, piece: &Piece, row: u8, col: u8) -> Option<Candidate> {
    let mut after = board.clone();
    after
        .commit(&piece.shape, piece.color, row as i32, col as i32)
        .ok()?;
    let lines = after.detect_full_lines().line_count();

    let mut contact = 0;
    for (dr, dc) in piece.shape.cells() {
        let r = (row + dr) as i32;
        let c = (col + dc) as i32;
        for (nr, nc) in [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)] {
            let in_piece = nr >= row as i32
                && nc >= col as i32
                && piece
                    .shape
                    .is_filled((nr - row as i32) as u8, (nc - col as i32) as u8);
            if in_piece {
                continue;
            }
            let off_grid = nr < 0 || nc < 0 || nr >= GRID_SIZE as i32 || nc >= GRID_SIZE as i32;
            if off_grid || board.is_occupied(nr, nc) {
                contact += 1;
            }
        }
    }

    Some(Candidate {
        piece: piece.id,
        row,
        col,
        lines,
        contact,
    })
}

/// Every legal placement of every active piece, in bank then row-major order
pub fn legal_placements<R: RandomSource>(engine: &GameEngine<R>) -> Vec<Candidate> {
    let board = engine.board();
    engine
        .active_pieces()
        .flat_map(move |piece| {
            board
                .legal_origins(&piece.shape)
                .filter_map(move |(row, col)| evaluate(board, piece, row, col))
        })
        .collect()
}

/// Best placement: most lines completed, then most contact; ties go to the
/// earliest piece and top-left-most origin.
pub fn choose<R: RandomSource>(engine: &GameEngine<R>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for candidate in legal_placements(engine) {
        match best {
            Some(b) if candidate.rank() <= b.rank() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Choose a placement and submit it
pub fn play_turn<R: RandomSource>(
    engine: &mut GameEngine<R>,
) -> Result<PlacementOutcome, PlanError> {
    if !engine.state().accepts_placement() {
        return Err(PlanError::NotPlayable);
    }
    let candidate = choose(engine).ok_or(PlanError::NoPlacement)?;
    Ok(engine.attempt_placement(candidate.piece, candidate.row as i32, candidate.col as i32)?)
}

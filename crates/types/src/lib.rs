//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, so they can be shared by the
//! rules engine, the placement planner and any presentation layer.
//!
//! # Board Dimensions
//!
//! The playfield is a fixed square grid:
//!
//! - **Rows**: 10 (indexed 0-9, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Origin**: row 0 / col 0 is the top-left cell
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `START_TIME_SECS` | 60 | Countdown at the start of a game |
//! | `PLACEMENT_SCORE` | 10 | Points for every accepted placement |
//! | `PLACEMENT_TIME_BONUS_SECS` | 5 | Seconds added per accepted placement |
//! | `LINE_CLEAR_SCORE` | 50 | Points per cleared row or column |
//! | `BANK_SIZE` | 3 | Pieces offered per refill |
//! | `DEFAULT_CLEAR_STEPS` | 6 | Steps of the timed clearing phase |
//!
//! # Examples
//!
//! ```
//! use tui_blockfit_types::{Color, EngineState, Phase, GRID_SIZE};
//!
//! let color = Color::from_str("Cyan").unwrap();
//! assert_eq!(color, Color::Cyan);
//! assert_eq!(Color::from_code(color.code()), Some(Color::Cyan));
//!
//! let state = EngineState::Active(Phase::AwaitingInput);
//! assert!(state.accepts_placement());
//!
//! assert_eq!(GRID_SIZE, 10);
//! ```

use std::fmt;

use serde::Serialize;

/// Grid side length in cells (10 rows, 10 columns)
pub const GRID_SIZE: u8 = 10;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Number of piece slots in the bank
pub const BANK_SIZE: usize = 3;

/// Countdown value set by `start()`
pub const START_TIME_SECS: i32 = 60;

/// Points awarded for every accepted placement
pub const PLACEMENT_SCORE: u32 = 10;

/// Seconds added to the countdown for every accepted placement
pub const PLACEMENT_TIME_BONUS_SECS: i32 = 5;

/// Points awarded per cleared line (row or column)
pub const LINE_CLEAR_SCORE: u32 = 50;

/// Number of steps in the timed clearing phase (matches the six-frame fade)
pub const DEFAULT_CLEAR_STEPS: u8 = 6;

/// Largest bounding box side a shape may have
pub const MAX_SHAPE_DIM: usize = 5;


/// The fixed six-color palette pieces are painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Yellow,
    Magenta,
    Cyan,
    Red,
}

impl Color {
    /// All palette entries, in draw order
    pub const PALETTE: [Color; 6] = [
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Red,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfit_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("MAGENTA"), Some(Color::Magenta));
    /// assert_eq!(Color::from_str("white"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "red" => Some(Color::Red),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::Red => "red",
        }
    }

    /// Compact grid code (1-6). Code 0 is reserved for an empty cell.
    pub fn code(&self) -> u8 {
        match self {
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Magenta => 4,
            Color::Cyan => 5,
            Color::Red => 6,
        }
    }

    /// Inverse of [`Color::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=6 => Some(Self::PALETTE[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Occupied cell painted with the placing piece's color
///
/// The color only exists while the cell is occupied.
pub type Cell = Option<Color>;

/// Identifier of a piece handed out by the bank.
///
/// Ids are monotonic for the lifetime of an engine, so an id from an earlier
/// refill (or an earlier game) never names a current piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sub-phase of a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the next placement
    AwaitingInput,
    /// Completed lines are being shown before they reset
    Clearing,
}

/// Engine lifecycle: `Idle -> Active -> GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "phase")]
pub enum EngineState {
    Idle,
    Active(Phase),
    GameOver,
}

impl EngineState {
    pub fn is_active(&self) -> bool {
        matches!(self, EngineState::Active(_))
    }

    pub fn accepts_placement(&self) -> bool {
        matches!(self, EngineState::Active(Phase::AwaitingInput))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineState::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Active(Phase::AwaitingInput) => "awaiting_input",
            EngineState::Active(Phase::Clearing) => "clearing",
            EngineState::GameOver => "game_over",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// The countdown reached zero
    TimeUp,
    /// No active piece fits anywhere on the board
    NoMoves,
}

/// How completed lines are removed after a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearMode {
    /// Detect, clear and score inside `attempt_placement`
    #[default]
    Immediate,
    /// Enter the clearing phase for `steps` calls of `advance_clear`
    Timed { steps: u8 },
}

impl ClearMode {
    /// `0` steps means an immediate clear.
    pub fn from_steps(steps: u8) -> Self {
        if steps == 0 {
            ClearMode::Immediate
        } else {
            ClearMode::Timed { steps }
        }
    }
}

/// Errors returned by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The piece does not fit at the requested origin. Expected during play.
    #[error("piece {piece} cannot be placed at ({row}, {col})")]
    IllegalPlacement { piece: PieceId, row: i32, col: i32 },
    /// The id does not name a currently active piece (caller bug).
    #[error("piece {0} is not an active piece")]
    InvalidReference(PieceId),
    /// A placement arrived while a line clear is still pending.
    #[error("engine is busy clearing lines")]
    EngineBusy,
    /// The operation is not valid in the current engine state.
    #[error("operation not valid while {0}")]
    NotRunning(EngineState),
    /// Internal rule broken by a caller of a low-level API.
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
}

impl EngineError {
    pub fn code(self) -> &'static str {
        match self {
            EngineError::IllegalPlacement { .. } => "illegal_placement",
            EngineError::InvalidReference(_) => "invalid_reference",
            EngineError::EngineBusy => "engine_busy",
            EngineError::NotRunning(_) => "not_running",
            EngineError::InvariantViolation(_) => "invariant_violation",
        }
    }

    /// Errors a presentation layer is expected to handle during normal play.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            EngineError::IllegalPlacement { .. } | EngineError::EngineBusy
        )
    }
}

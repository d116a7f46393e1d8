//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the rules of the block placement puzzle.
//! It has **zero dependencies** on UI, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or scripted source) produces identical games
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: A terminal, GUI or headless runner can drive it the same way
//! - **Allocation-free**: Board, bank and line reports live in fixed-size storage
//!
//! # Module Structure
//!
//! - [`shape`]: Immutable polyomino masks and the 19-shape catalog
//! - [`rng`]: Injected random sources (seeded `StdRng`, scripted indices)
//! - [`bank`]: The three offered pieces and their active/consumed status
//! - [`board`]: 10x10 grid with placement legality and row/column clearing
//! - [`game_engine`]: Score, countdown, clearing phase and game-over detection
//! - [`config`]: Rule values (scores, time bonus, clear mode)
//! - [`snapshot`]: Render-ready copy of the engine state
//!
//! # Game Rules
//!
//! - **Placement**: A piece fits when its whole bounding box lies on the grid and
//!   every filled cell lands on an empty cell; +10 points and +5 seconds
//! - **Line clears**: Every full row and full column is cleared at once; +50 points per line
//! - **Bank**: Three pieces at a time; a new set is dealt only when all three are placed
//! - **Game over**: The countdown reaches zero, or no active piece fits anywhere
//!
//! # Example
//!
//! ```
//! use tui_blockfit_core::GameEngine;
//!
//! // Create and start a game
//! let mut game = GameEngine::new(12345);
//! game.start();
//!
//! // Every catalog shape fits in the top-left corner of an empty board
//! let id = game.active_pieces().next().unwrap().id;
//! let outcome = game.attempt_placement(id, 0, 0).unwrap();
//!
//! assert_eq!(outcome.score, 10);
//! assert_eq!(game.time_remaining(), 65);
//! ```
//!
//! # Timing
//!
//! The engine has no clock. The embedding program calls
//! [`GameEngine::tick`](game_engine::GameEngine::tick) once per second, and
//! [`GameEngine::advance_clear`](game_engine::GameEngine::advance_clear) once per
//! animation frame while lines are clearing.

pub mod bank;
pub mod board;
pub mod config;
pub mod game_engine;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use tui_blockfit_types as types;

// Re-export commonly used types for convenience
pub use bank::{Piece, PieceBank, PieceStatus};
pub use board::{Board, ClearEvent};
pub use config::EngineConfig;
pub use game_engine::{
    ClearProgress, ClearResult, GameEngine, PendingClear, PlacementOutcome, TickOutcome,
};
pub use rng::{seeded, RandomSource, ScriptedSource};
pub use shape::{catalog_shape, pick_random_color, pick_random_shape, Shape, ShapeError, CATALOG};
pub use snapshot::GameSnapshot;

//! Placement planner.
//!
//! Chooses where to put the next piece for a headless run, a benchmark or a
//! test that needs to play a whole game. It only reads the engine's public
//! state and submits moves through `attempt_placement`, exactly like a
//! presentation layer would.

pub mod place;

pub use place::{choose, legal_placements, play_turn, Candidate, PlanError};

pub use tui_blockfit_core as core;
pub use tui_blockfit_types as types;

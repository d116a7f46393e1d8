//! Block Fit (workspace facade crate).
//!
//! Re-exports the rules engine crates as `tui_blockfit::{types,core,engine}` and
//! adds the headless runner pieces: environment [`config`] and the [`runner`] loop
//! behind the `blockfit` binary.

pub use tui_blockfit_core as core;
pub use tui_blockfit_engine as engine;
pub use tui_blockfit_types as types;

pub mod config;
pub mod runner;

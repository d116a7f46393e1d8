use arrayvec::ArrayVec;
use serde::Serialize;

use crate::bank::Piece;
use crate::game_engine::PendingClear;
use crate::types::{EngineState, GameOverReason, BANK_SIZE, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Color codes per cell, 0 = empty (see `Color::code`)
    pub board: [[u8; SIZE]; SIZE],
    /// Bank slots in order, consumed ones included
    pub pieces: ArrayVec<Piece, BANK_SIZE>,
    pub score: u32,
    pub time_remaining: i32,
    pub state: EngineState,
    pub game_over_reason: Option<GameOverReason>,
    pub pending_clear: Option<PendingClear>,
    pub episode_id: u32,
    pub placements: u32,
    pub lines_cleared: u32,
}

impl GameSnapshot {
    /// Reset to an idle, empty frame. The countdown reads 0 until an engine
    /// writes its own value through `snapshot_into`.
    pub fn clear(&mut self) {
        self.board = [[0u8; SIZE]; SIZE];
        self.pieces.clear();
        self.score = 0;
        self.time_remaining = 0;
        self.state = EngineState::Idle;
        self.game_over_reason = None;
        self.pending_clear = None;
        self.episode_id = 0;
        self.placements = 0;
        self.lines_cleared = 0;
    }

    pub fn playable(&self) -> bool {
        self.state.accepts_placement()
    }

    /// Active pieces only
    pub fn active_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(|p| p.is_active())
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; SIZE]; SIZE],
            pieces: ArrayVec::new(),
            score: 0,
            time_remaining: 0,
            state: EngineState::Idle,
            game_over_reason: None,
            pending_clear: None,
            episode_id: 0,
            placements: 0,
            lines_cleared: 0,
        };
        s.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::GameEngine;
    use crate::types::Phase;

    #[test]
    fn default_snapshot_is_idle_and_empty() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.state, EngineState::Idle);
        assert!(snap.pieces.is_empty());
        assert!(!snap.playable());
        assert!(snap.board.iter().flatten().all(|&c| c == 0));
        assert_eq!(snap.time_remaining, 0);
    }

    #[test]
    fn idle_snapshot_reports_configured_countdown() {
        let config = crate::config::EngineConfig {
            start_time_secs: 45,
            ..Default::default()
        };
        let engine = GameEngine::with_config(2, config);
        let snap = engine.snapshot();
        assert_eq!(snap.state, EngineState::Idle);
        assert_eq!(snap.time_remaining, 45);
    }

    #[test]
    fn snapshot_into_reuses_buffer() {
        let mut engine = GameEngine::new(9);
        engine.start();

        let mut snap = GameSnapshot::default();
        engine.snapshot_into(&mut snap);
        assert_eq!(snap.state, EngineState::Active(Phase::AwaitingInput));
        assert_eq!(snap.pieces.len(), 3);
        assert_eq!(snap.active_pieces().count(), 3);
        assert!(snap.playable());

        let id = snap.pieces[0].id;
        engine.attempt_placement(id, 0, 0).unwrap();
        engine.snapshot_into(&mut snap);
        assert_eq!(snap.pieces.len(), 3);
        assert_eq!(snap.active_pieces().count(), 2);
        assert_eq!(snap.score, 10);
        assert_ne!(snap.board[0][0], 0);
        assert_eq!(snap, engine.snapshot());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut engine = GameEngine::new(3);
        engine.start();
        let value = serde_json::to_value(engine.snapshot()).unwrap();

        assert_eq!(value["score"], 0);
        assert_eq!(value["time_remaining"], 60);
        assert_eq!(value["state"]["state"], "active");
        assert_eq!(value["state"]["phase"], "awaiting_input");
        assert_eq!(value["pieces"].as_array().unwrap().len(), 3);
        assert_eq!(value["pieces"][0]["status"], "active");
        assert!(value["pieces"][0]["shape"].is_array());
        assert_eq!(value["board"].as_array().unwrap().len(), 10);
    }
}

//! Game engine module - the rules state machine
//!
//! Ties together the board, the piece bank, the score and the countdown. A
//! presentation layer drives it with discrete events ([`GameEngine::attempt_placement`],
//! [`GameEngine::tick`], [`GameEngine::advance_clear`]) and reads the resulting
//! state back through accessors or a [`GameSnapshot`].
//!
//! Lifecycle: `Idle -> Active(AwaitingInput | Clearing) -> GameOver`. The
//! clearing phase only exists with [`ClearMode::Timed`]; in that mode completed
//! lines stay on the board for a number of `advance_clear` calls and are scored
//! when they finally reset. The countdown keeps running while lines are clearing.
//!
//! All operations take `&mut self`, so they are applied one at a time.

use rand::rngs::StdRng;
use serde::Serialize;

use crate::bank::{Piece, PieceBank};
use crate::board::{Board, ClearEvent};
use crate::config::EngineConfig;
use crate::rng::{seeded, RandomSource};
use crate::shape::Shape;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Result of an accepted placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementOutcome {
    pub piece: PieceId,
    pub row: u8,
    pub col: u8,
    /// Lines completed by this placement
    pub lines: ClearEvent,
    /// Lines were completed but will only reset once the clearing phase ends
    pub clear_pending: bool,
    /// Points awarded by this call (placement plus any immediate clear)
    pub points: u32,
    pub score: u32,
    pub time_remaining: i32,
    /// The bank was exhausted and replaced with three new pieces
    pub refilled: bool,
    pub game_over: bool,
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickOutcome {
    pub time_remaining: i32,
    pub game_over: bool,
}

/// Lines waiting out the clearing phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingClear {
    pub lines: ClearEvent,
    /// Steps already taken
    pub step: u8,
    /// Total steps before the lines reset
    pub steps: u8,
}

/// Result of a completed line clear
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearResult {
    pub lines: ClearEvent,
    pub points: u32,
    pub score: u32,
    pub game_over: bool,
}

/// Progress reported by [`GameEngine::advance_clear`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearProgress {
    /// Still clearing; `step` of `steps` taken
    Pending { step: u8, steps: u8 },
    /// Lines reset and scored; back to awaiting input (or game over)
    Applied(ClearResult),
}

/// Block puzzle rules engine
#[derive(Debug, Clone)]
pub struct GameEngine<R: RandomSource = StdRng> {
    config: EngineConfig,
    rng: R,
    board: Board,
    bank: PieceBank,
    state: EngineState,
    score: u32,
    time_remaining: i32,
    game_over_reason: Option<GameOverReason>,
    pending_clear: Option<PendingClear>,
    /// Last accepted placement (consumed by observers).
    last_event: Option<PlacementOutcome>,
    /// Incremented by every `start()`.
    episode_id: u32,
    placements: u32,
    lines_cleared: u32,
}

impl GameEngine<StdRng> {
    /// Create an idle engine with default rules and a seeded generator
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, EngineConfig::default())
    }

    pub fn with_config(seed: u64, config: EngineConfig) -> Self {
        Self::from_source(seeded(seed), config)
    }
}

impl Default for GameEngine<StdRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Create an idle engine drawing pieces from `rng`
    pub fn from_source(rng: R, config: EngineConfig) -> Self {
        Self {
            config,
            rng,
            board: Board::new(),
            bank: PieceBank::new(),
            state: EngineState::Idle,
            score: 0,
            time_remaining: config.start_time_secs,
            game_over_reason: None,
            pending_clear: None,
            last_event: None,
            episode_id: 0,
            placements: 0,
            lines_cleared: 0,
        }
    }

    /// Start (or restart) a game: empty board, fresh bank, full countdown.
    pub fn start(&mut self) {
        self.reset();
        self.board.clear();
        self.bank.refill(&mut self.rng);
        self.state = EngineState::Active(Phase::AwaitingInput);
    }

    /// Start a game from a prepared board and bank.
    ///
    /// Unlike [`GameEngine::start`] the position may already be stuck, so the
    /// game-over search runs immediately.
    pub fn start_with(&mut self, board: Board, pieces: [(Shape, Color); BANK_SIZE]) -> EngineState {
        self.reset();
        self.board = board;
        self.bank.fill_with(pieces);
        self.state = EngineState::Active(Phase::AwaitingInput);
        self.check_no_moves();
        self.state
    }

    fn reset(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.time_remaining = self.config.start_time_secs;
        self.game_over_reason = None;
        self.pending_clear = None;
        self.last_event = None;
        self.placements = 0;
        self.lines_cleared = 0;
    }

    /// Place an active piece with its top-left corner at (row, col).
    ///
    /// Rejections leave the engine untouched:
    /// - `IllegalPlacement` when the piece does not fit there
    /// - `InvalidReference` when `id` is not an active piece
    /// - `EngineBusy` while lines are clearing
    /// - `NotRunning` before `start()` or after game over
    pub fn attempt_placement(
        &mut self,
        id: PieceId,
        row: i32,
        col: i32,
    ) -> Result<PlacementOutcome, EngineError> {
        match self.state {
            EngineState::Active(Phase::AwaitingInput) => {}
            EngineState::Active(Phase::Clearing) => return Err(EngineError::EngineBusy),
            state => return Err(EngineError::NotRunning(state)),
        }

        let piece = *self
            .bank
            .active(id)
            .ok_or(EngineError::InvalidReference(id))?;
        if !self.board.can_place(&piece.shape, row, col) {
            return Err(EngineError::IllegalPlacement {
                piece: id,
                row,
                col,
            });
        }

        self.board.commit(&piece.shape, piece.color, row, col)?;
        self.bank.mark_consumed(id)?;
        self.placements += 1;
        self.score = self.score.saturating_add(self.config.placement_score);
        self.time_remaining += self.config.placement_time_bonus_secs;
        let mut points = self.config.placement_score;

        let lines = self.board.detect_full_lines();
        let mut clear_pending = false;
        if !lines.is_empty() {
            match self.config.clear_mode {
                ClearMode::Immediate => points += self.apply_clear(&lines),
                ClearMode::Timed { steps } => {
                    self.pending_clear = Some(PendingClear {
                        lines: lines.clone(),
                        step: 0,
                        steps,
                    });
                    self.state = EngineState::Active(Phase::Clearing);
                    clear_pending = true;
                }
            }
        }

        let refilled = self.bank.all_consumed();
        if refilled {
            self.bank.refill(&mut self.rng);
        }

        // A pending clear changes the board, so the search waits for it.
        if !clear_pending {
            self.check_no_moves();
        }

        let outcome = PlacementOutcome {
            piece: id,
            row: row as u8,
            col: col as u8,
            lines,
            clear_pending,
            points,
            score: self.score,
            time_remaining: self.time_remaining,
            refilled,
            game_over: self.is_over(),
        };
        self.last_event = Some(outcome.clone());
        Ok(outcome)
    }

    /// Advance the countdown by one second.
    ///
    /// Valid in both active phases. Reaching zero ends the game and drops any
    /// pending clear unscored.
    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if !self.state.is_active() {
            return Err(EngineError::NotRunning(self.state));
        }

        self.time_remaining -= 1;
        if self.time_remaining <= 0 {
            self.pending_clear = None;
            self.end(GameOverReason::TimeUp);
        }

        Ok(TickOutcome {
            time_remaining: self.time_remaining,
            game_over: self.is_over(),
        })
    }

    /// Take one step of the clearing phase; the last step resets and scores the lines.
    pub fn advance_clear(&mut self) -> Result<ClearProgress, EngineError> {
        let pending = match (self.state, self.pending_clear.as_mut()) {
            (EngineState::Active(Phase::Clearing), Some(pending)) => pending,
            _ => return Err(EngineError::NotRunning(self.state)),
        };

        pending.step = pending.step.saturating_add(1);
        if pending.step < pending.steps {
            return Ok(ClearProgress::Pending {
                step: pending.step,
                steps: pending.steps,
            });
        }

        self.finish_clear().map(ClearProgress::Applied)
    }

    /// Skip the rest of the clearing phase and apply the pending clear now.
    pub fn finish_clear(&mut self) -> Result<ClearResult, EngineError> {
        if self.state != EngineState::Active(Phase::Clearing) {
            return Err(EngineError::NotRunning(self.state));
        }
        let pending = self
            .pending_clear
            .take()
            .ok_or(EngineError::InvariantViolation("clearing without pending lines"))?;

        let points = self.apply_clear(&pending.lines);
        self.state = EngineState::Active(Phase::AwaitingInput);
        self.check_no_moves();

        Ok(ClearResult {
            lines: pending.lines,
            points,
            score: self.score,
            game_over: self.is_over(),
        })
    }

    fn apply_clear(&mut self, lines: &ClearEvent) -> u32 {
        self.board.apply_clear(lines);
        let count = lines.line_count();
        self.lines_cleared += count as u32;
        let points = self.config.clear_points(count);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Whether any active piece fits anywhere on the board
    pub fn has_legal_move(&self) -> bool {
        self.bank
            .active_pieces()
            .any(|piece| self.board.first_fit(&piece.shape).is_some())
    }

    fn check_no_moves(&mut self) {
        if self.state.is_active() && !self.has_legal_move() {
            self.end(GameOverReason::NoMoves);
        }
    }

    fn end(&mut self, reason: GameOverReason) {
        self.state = EngineState::GameOver;
        self.game_over_reason = Some(reason);
    }

    /// Take and clear the last placement outcome.
    pub fn take_last_event(&mut self) -> Option<PlacementOutcome> {
        self.last_event.take()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> i32 {
        self.time_remaining
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.bank.active_pieces()
    }

    /// Look up an active piece by id
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.bank.active(id)
    }

    pub fn pending_clear(&self) -> Option<&PendingClear> {
        self.pending_clear.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.pieces.clear();
        out.pieces.extend(self.bank.slots().iter().copied());
        out.score = self.score;
        out.time_remaining = self.time_remaining;
        out.state = self.state;
        out.game_over_reason = self.game_over_reason;
        out.pending_clear = self.pending_clear.clone();
        out.episode_id = self.episode_id;
        out.placements = self.placements;
        out.lines_cleared = self.lines_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

//! Headless game loop: the planner plays one seeded game to the end.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::RunConfig;
use crate::core::{ClearProgress, GameEngine, GameSnapshot};
use crate::engine::play_turn;
use crate::types::{EngineState, Phase};

/// Final state of a runner game
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub turns: u32,
    /// False when the game stopped at `max_turns` instead of ending
    pub finished: bool,
    pub snapshot: GameSnapshot,
}

macro_rules! verbose {
    ($config:expr, $($arg:tt)*) => {
        if $config.verbose {
            eprintln!($($arg)*);
        }
    };
}

/// Play one game with `config` and return its final state.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let mut engine = GameEngine::with_config(config.seed, config.engine_config());
    engine.start();
    verbose!(
        config,
        "[Runner] Episode {} started (seed {}, {:?})",
        engine.episode_id(),
        config.seed,
        config.clear_mode()
    );

    let mut turns = 0;
    while !engine.is_over() && turns < config.max_turns {
        turns += 1;

        if engine.state() == EngineState::Active(Phase::Clearing) {
            let progress = engine
                .advance_clear()
                .with_context(|| format!("clearing step failed on turn {}", turns))?;
            if let ClearProgress::Applied(result) = progress {
                verbose!(
                    config,
                    "[Runner] Cleared {} line(s) for {} points",
                    result.lines.line_count(),
                    result.points
                );
            }
        } else {
            let outcome = play_turn(&mut engine)
                .with_context(|| format!("placement failed on turn {}", turns))?;
            verbose!(
                config,
                "[Runner] Turn {}: piece {} at ({}, {}) +{} -> score {}",
                turns,
                outcome.piece,
                outcome.row,
                outcome.col,
                outcome.points,
                outcome.score
            );
        }

        for _ in 0..config.ticks_per_turn {
            if engine.is_over() {
                break;
            }
            engine.tick()?;
        }
    }

    let finished = engine.is_over();
    match engine.game_over_reason() {
        Some(reason) => verbose!(
            config,
            "[Runner] Game over after {} turns ({:?}), score {}",
            turns,
            reason,
            engine.score()
        ),
        None => verbose!(
            config,
            "[Runner] Stopped after {} turns, score {}",
            turns,
            engine.score()
        ),
    }
    if config.verbose {
        eprintln!("{}", engine.board());
    }

    Ok(RunSummary {
        seed: config.seed,
        turns,
        finished,
        snapshot: engine.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_turns_returns_fresh_game() {
        let config = RunConfig {
            max_turns: 0,
            ..RunConfig::default()
        };
        let summary = run(&config).unwrap();
        assert_eq!(summary.turns, 0);
        assert!(!summary.finished);
        assert_eq!(summary.snapshot.score, 0);
        assert_eq!(summary.snapshot.active_pieces().count(), 3);
    }

    #[test]
    fn same_seed_same_game() {
        let config = RunConfig {
            seed: 77,
            max_turns: 40,
            ..RunConfig::default()
        };
        let a = run(&config).unwrap();
        let b = run(&config).unwrap();
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.snapshot, b.snapshot);
    }
}

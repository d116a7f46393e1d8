//! Runner configuration and headless runs

use std::collections::HashMap;

use tui_blockfit::config::{RunConfig, DEFAULT_MAX_TURNS, DEFAULT_SEED};
use tui_blockfit::runner;
use tui_blockfit::types::{ClearMode, EngineState};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_values_are_read() {
    let config = RunConfig::from_lookup(lookup(&[
        ("BLOCKFIT_SEED", "123"),
        ("BLOCKFIT_MAX_TURNS", "20"),
        ("BLOCKFIT_CLEAR_STEPS", "6"),
        ("BLOCKFIT_TICKS_PER_TURN", "2"),
        ("BLOCKFIT_VERBOSE", "1"),
    ]));
    assert_eq!(config.seed, 123);
    assert_eq!(config.max_turns, 20);
    assert_eq!(config.clear_mode(), ClearMode::Timed { steps: 6 });
    assert_eq!(config.engine_config().clear_mode, ClearMode::Timed { steps: 6 });
    assert_eq!(config.ticks_per_turn, 2);
    assert!(config.verbose);
}

#[test]
fn test_invalid_values_fall_back() {
    let config = RunConfig::from_lookup(lookup(&[
        ("BLOCKFIT_SEED", "abc"),
        ("BLOCKFIT_MAX_TURNS", "-3"),
        ("BLOCKFIT_CLEAR_STEPS", "300"),
        ("BLOCKFIT_VERBOSE", "yes please"),
    ]));
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.max_turns, DEFAULT_MAX_TURNS);
    assert_eq!(config.clear_mode(), ClearMode::Immediate);
    assert!(!config.verbose);
}

#[test]
fn test_runner_finishes_game() {
    let config = RunConfig {
        seed: 9,
        max_turns: 10_000,
        ticks_per_turn: 6,
        ..RunConfig::default()
    };
    let summary = runner::run(&config).unwrap();
    assert!(summary.finished);
    assert_eq!(summary.snapshot.state, EngineState::GameOver);
    assert!(summary.snapshot.game_over_reason.is_some());
    assert_eq!(summary.seed, 9);
}

#[test]
fn test_runner_with_timed_clears() {
    let config = RunConfig {
        seed: 4,
        max_turns: 10_000,
        clear_steps: 3,
        ticks_per_turn: 6,
        ..RunConfig::default()
    };
    let summary = runner::run(&config).unwrap();
    assert!(summary.finished);
    assert!(summary.turns >= summary.snapshot.placements);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["finished"], true);
    assert_eq!(json["snapshot"]["state"]["state"], "game_over");
}

#[test]
fn test_runner_stops_at_turn_limit() {
    let config = RunConfig {
        seed: 4,
        max_turns: 3,
        ticks_per_turn: 0,
        ..RunConfig::default()
    };
    let summary = runner::run(&config).unwrap();
    assert_eq!(summary.turns, 3);
    assert!(!summary.finished);
    assert_eq!(summary.snapshot.placements, 3);
    assert_eq!(summary.snapshot.time_remaining, 75);
}

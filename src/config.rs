//! Runner configuration read from `BLOCKFIT_*` environment variables

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::core::EngineConfig;
use crate::types::ClearMode;

pub const DEFAULT_SEED: u64 = 1;
pub const DEFAULT_MAX_TURNS: u32 = 500;
pub const DEFAULT_TICKS_PER_TURN: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u64,
    /// Upper bound on runner iterations (placements plus clearing steps)
    pub max_turns: u32,
    /// 0 clears lines immediately; otherwise the clearing phase length
    pub clear_steps: u8,
    /// Countdown ticks issued after every turn
    pub ticks_per_turn: u32,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_turns: DEFAULT_MAX_TURNS,
            clear_steps: 0,
            ticks_per_turn: DEFAULT_TICKS_PER_TURN,
            verbose: false,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = parse_or(&lookup, "BLOCKFIT_SEED", DEFAULT_SEED);
        let max_turns = parse_or(&lookup, "BLOCKFIT_MAX_TURNS", DEFAULT_MAX_TURNS);
        let clear_steps = parse_or(&lookup, "BLOCKFIT_CLEAR_STEPS", 0u8);
        let ticks_per_turn = parse_or(&lookup, "BLOCKFIT_TICKS_PER_TURN", DEFAULT_TICKS_PER_TURN);
        let verbose = lookup("BLOCKFIT_VERBOSE")
            .map(|s| {
                let s = s.trim();
                s == "1" || s.eq_ignore_ascii_case("true")
            })
            .unwrap_or(false);

        Self {
            seed,
            max_turns,
            clear_steps,
            ticks_per_turn,
            verbose,
        }
    }

    pub fn clear_mode(&self) -> ClearMode {
        ClearMode::from_steps(self.clear_steps)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default().with_clear_mode(self.clear_mode())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("[Config] Ignoring {}={:?}, using {}", key, raw, default);
            default
        }
    }
}

//! Rule configuration for [`GameEngine`](crate::GameEngine)

use serde::Serialize;

use crate::types::{
    ClearMode, LINE_CLEAR_SCORE, PLACEMENT_SCORE, PLACEMENT_TIME_BONUS_SECS, START_TIME_SECS,
};

/// Scoring, countdown and clearing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Countdown set by `start()`
    pub start_time_secs: i32,
    /// Points per accepted placement
    pub placement_score: u32,
    /// Seconds added per accepted placement
    pub placement_time_bonus_secs: i32,
    /// Points per cleared row or column
    pub line_clear_score: u32,
    pub clear_mode: ClearMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_time_secs: START_TIME_SECS,
            placement_score: PLACEMENT_SCORE,
            placement_time_bonus_secs: PLACEMENT_TIME_BONUS_SECS,
            line_clear_score: LINE_CLEAR_SCORE,
            clear_mode: ClearMode::Immediate,
        }
    }
}

impl EngineConfig {
    pub fn with_clear_mode(mut self, clear_mode: ClearMode) -> Self {
        self.clear_mode = clear_mode;
        self
    }

    /// Points for clearing `lines` distinct rows/columns at once
    pub fn clear_points(&self, lines: usize) -> u32 {
        self.line_clear_score.saturating_mul(lines as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_rule_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.start_time_secs, 60);
        assert_eq!(config.placement_score, 10);
        assert_eq!(config.placement_time_bonus_secs, 5);
        assert_eq!(config.clear_mode, ClearMode::Immediate);
    }

    #[test]
    fn clear_points_scale_with_line_count() {
        let config = EngineConfig::default();
        assert_eq!(config.clear_points(0), 0);
        assert_eq!(config.clear_points(1), 50);
        assert_eq!(config.clear_points(3), 150);
    }
}

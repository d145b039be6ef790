use serde::{Deserialize, Serialize};

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 8;
const MAX_TIME_LIMIT_MS: u64 = 10_000;

/// Limits for one search call, loadable from `{maxDepth, timeLimitMs}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub max_depth: u8,
    pub time_limit_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::for_level(3)
    }
}

impl SearchConfig {
    pub fn new(max_depth: u8, time_limit_ms: u64) -> Self {
        Self {
            max_depth,
            time_limit_ms,
        }
    }

    /// Difficulty table for automated players. Levels outside 1..=4 clamp.
    pub fn for_level(level: u8) -> Self {
        match level {
            0 | 1 => Self::new(2, 120),
            2 => Self::new(3, 250),
            3 => Self::new(4, 450),
            _ => Self::new(5, 700),
        }
    }

    /// Clamps depth to 1..=8 and the budget to at most 10 s.
    pub fn sanitized(self) -> Self {
        Self {
            max_depth: self.max_depth.clamp(MIN_DEPTH, MAX_DEPTH),
            time_limit_ms: self.time_limit_ms.min(MAX_TIME_LIMIT_MS),
        }
    }
}

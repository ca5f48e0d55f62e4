use std::fmt;
use std::str::FromStr;

use crate::{
    GLOBAL_GAP, GLOBAL_MATCH, GLOBAL_MISMATCH, LOCAL_GAP, LOCAL_MATCH, LOCAL_MISMATCH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignmentMode {
    #[default]
    Global, // Needleman-Wunsch
    Local,  // Smith-Waterman
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentMode::Global => f.write_str("global"),
            AlignmentMode::Local => f.write_str("local"),
        }
    }
}

impl FromStr for AlignmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" | "nw" => Ok(AlignmentMode::Global),
            "local" | "sw" => Ok(AlignmentMode::Local),
            other => Err(format!("unknown alignment mode: {other}")),
        }
    }
}

/// Mode plus the three linear scoring weights.
///
/// Gap is a single per-symbol weight; there is no open/extend split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentParams {
    pub mode: AlignmentMode,
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_score: i32,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self::for_mode(AlignmentMode::Global)
    }
}

impl AlignmentParams {
    pub fn for_mode(mode: AlignmentMode) -> Self {
        match mode {
            AlignmentMode::Global => Self {
                mode,
                match_score: GLOBAL_MATCH,
                mismatch_score: GLOBAL_MISMATCH,
                gap_score: GLOBAL_GAP,
            },
            AlignmentMode::Local => Self {
                mode,
                match_score: LOCAL_MATCH,
                mismatch_score: LOCAL_MISMATCH,
                gap_score: LOCAL_GAP,
            },
        }
    }

    pub fn with_match(mut self, score: i32) -> Self {
        self.match_score = score;
        self
    }

    pub fn with_mismatch(mut self, score: i32) -> Self {
        self.mismatch_score = score;
        self
    }

    pub fn with_gap(mut self, score: i32) -> Self {
        self.gap_score = score;
        self
    }

    /// Substitution weight for a pair of symbols.
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// Largest absolute weight, used to bound score growth.
    pub fn max_abs_weight(&self) -> u64 {
        [self.match_score, self.mismatch_score, self.gap_score]
            .iter()
            .map(|w| w.unsigned_abs() as u64)
            .max()
            .unwrap_or(0)
    }
}

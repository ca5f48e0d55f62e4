use std::fmt;

use crate::traceback::TracebackOperation;
use crate::Score;

/// Grid coordinate: `i` is the row (subject), `j` the column (query).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { i: 0, j: 0 };

    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Highest score seen so far and where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestRecord {
    pub score: Score,
    pub position: Position,
}

/// Best cell within one diagonal, tagged with its offset along the diagonal
/// so that reductions are independent of the order workers finish in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub score: Score,
    pub offset: usize,
    pub position: Position,
}

impl Candidate {
    /// Higher score wins; on equal scores the smaller offset does.
    #[inline]
    pub fn better(self, other: Candidate) -> Candidate {
        if other.score > self.score || (other.score == self.score && other.offset < self.offset) {
            other
        } else {
            self
        }
    }

    /// Folds an optional running best with a new cell.
    #[inline]
    pub fn merge(best: Option<Candidate>, next: Candidate) -> Option<Candidate> {
        Some(match best {
            Some(b) => b.better(next),
            None => next,
        })
    }
}

/// Running maximum for Local alignment.
///
/// Only ever touched by the thread driving the wavefront, after each
/// diagonal's barrier, so updates are never lost or reordered.
#[derive(Debug, Clone, Default)]
pub struct BestScoreTracker {
    best: BestRecord,
    updates: usize,
}

impl BestScoreTracker {
    /// Starts at the origin with score 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the record only if `candidate` is strictly better, so the
    /// earliest position wins among equal scores.
    pub fn offer(&mut self, candidate: Option<Candidate>) {
        if let Some(c) = candidate {
            if c.score > self.best.score {
                log::trace!("best score {} -> {} at {}", self.best.score, c.score, c.position);
                self.best = BestRecord {
                    score: c.score,
                    position: c.position,
                };
                self.updates += 1;
            }
        }
    }

    pub fn best(&self) -> BestRecord {
        self.best
    }

    /// How many times the record improved.
    pub fn updates(&self) -> usize {
        self.updates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
    pub length: u32,
}

impl AlignmentStats {
    pub fn from_operations(ops: &[TracebackOperation]) -> Self {
        ops.iter().fold(Self::default(), |mut acc, op| {
            match op {
                TracebackOperation::Match => acc.matches += 1,
                TracebackOperation::Mismatch => acc.mismatches += 1,
                TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
            }
            acc.length += 1;
            acc
        })
    }

    /// Fraction of alignment columns that are identical symbols.
    pub fn identity(&self) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.matches as f64 / self.length as f64
        }
    }
}

use std::ops::Range;

use crate::alignment_mode::{AlignmentMode, AlignmentParams};
use crate::context::AlignmentContext;
use crate::grid::{Direction, ScoreGrid};
use crate::scoring::{AlignmentStats, Position};
use crate::{AlignerError, Result, Score};

/// Symbol written opposite a gap.
pub const GAP_SYMBOL: u8 = b'-';

/// One column of the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Subject symbol against a gap in the query (an Up step).
    Insertion,
    /// Query symbol against a gap in the subject (a Left step).
    Deletion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub score: Score,
    pub aligned_query: Vec<u8>,
    pub aligned_subject: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
    /// Cell the walk stopped at; the alignment starts just after it.
    pub start: Position,
    /// Cell the walk began at.
    pub end: Position,
    /// Cells that emitted a column, from `end` backwards.
    pub path: Vec<Position>,
}

impl AlignedPair {
    fn empty(score: Score, at: Position) -> Self {
        Self {
            score,
            aligned_query: Vec::new(),
            aligned_subject: Vec::new(),
            operations: Vec::new(),
            start: at,
            end: at,
            path: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Query symbols covered by the alignment.
    pub fn query_range(&self) -> Range<usize> {
        self.start.j..self.end.j
    }

    /// Subject symbols covered by the alignment.
    pub fn subject_range(&self) -> Range<usize> {
        self.start.i..self.end.i
    }

    pub fn stats(&self) -> AlignmentStats {
        AlignmentStats::from_operations(&self.operations)
    }

    /// Score of the alignment columns under `params`, recomputed from scratch.
    pub fn rescore(&self, params: &AlignmentParams) -> Score {
        self.operations
            .iter()
            .map(|op| match op {
                TracebackOperation::Match => params.match_score as Score,
                TracebackOperation::Mismatch => params.mismatch_score as Score,
                TracebackOperation::Insertion | TracebackOperation::Deletion => {
                    params.gap_score as Score
                }
            })
            .sum()
    }
}

/// Walks direction pointers from an end cell back to the start condition.
///
/// Never writes to the grid; the visited cells are returned in
/// [`AlignedPair::path`] instead.
pub struct Backtracker<'g, 'a> {
    ctx: &'g AlignmentContext<'a>,
    grid: &'g ScoreGrid,
}

impl<'g, 'a> Backtracker<'g, 'a> {
    pub fn new(ctx: &'g AlignmentContext<'a>, grid: &'g ScoreGrid) -> Self {
        Self { ctx, grid }
    }

    /// Traces back from `end`.
    ///
    /// Global runs stop at the origin, Local runs at the first cell whose
    /// direction is [`Direction::None`].
    pub fn trace(&self, end: Position, score: Score) -> Result<AlignedPair> {
        let query = self.ctx.query();
        let subject = self.ctx.subject();
        let mode = self.ctx.mode();
        let capacity = end.i + end.j;

        let mut aligned_query = Vec::with_capacity(capacity);
        let mut aligned_subject = Vec::with_capacity(capacity);
        let mut operations = Vec::with_capacity(capacity);
        let mut path = Vec::with_capacity(capacity);
        let mut current = end;

        // Every step lowers i + j, so the walk ends within end.i + end.j steps.
        loop {
            if mode == AlignmentMode::Global && current == Position::ORIGIN {
                break;
            }
            let direction = self.grid.direction(current.i, current.j);
            if direction == Direction::None {
                if mode == AlignmentMode::Local {
                    break;
                }
                return Err(AlignerError::TracebackError(format!(
                    "no predecessor at {current} before reaching the origin"
                )));
            }

            let prev = step_back(current, direction).ok_or_else(|| {
                AlignerError::TracebackError(format!(
                    "{direction:?} pointer at {current} leaves the grid"
                ))
            })?;
            path.push(current);

            match direction {
                Direction::Diagonal => {
                    let q = query[current.j - 1];
                    let s = subject[current.i - 1];
                    aligned_query.push(q);
                    aligned_subject.push(s);
                    operations.push(if q == s {
                        TracebackOperation::Match
                    } else {
                        TracebackOperation::Mismatch
                    });
                }
                Direction::Up => {
                    aligned_query.push(GAP_SYMBOL);
                    aligned_subject.push(subject[current.i - 1]);
                    operations.push(TracebackOperation::Insertion);
                }
                Direction::Left => {
                    aligned_query.push(query[current.j - 1]);
                    aligned_subject.push(GAP_SYMBOL);
                    operations.push(TracebackOperation::Deletion);
                }
                Direction::None => {}
            }
            current = prev;
        }

        // Built backwards.
        aligned_query.reverse();
        aligned_subject.reverse();
        operations.reverse();

        Ok(AlignedPair {
            score,
            aligned_query,
            aligned_subject,
            operations,
            start: current,
            end,
            path,
        })
    }

    /// Result for inputs where at least one sequence is empty, built without
    /// a grid: Global pairs every symbol with a gap, Local is empty.
    pub fn degenerate(ctx: &AlignmentContext<'_>) -> AlignedPair {
        let rows = ctx.rows();
        let cols = ctx.cols();

        if ctx.mode() == AlignmentMode::Local {
            return AlignedPair::empty(0, Position::ORIGIN);
        }

        let gap = ctx.params().gap_score as Score;
        let end = Position::new(rows, cols);
        let mut pair = AlignedPair::empty(rows.max(cols) as Score * gap, Position::ORIGIN);
        pair.end = end;

        if rows == 0 {
            pair.aligned_query = ctx.query().to_vec();
            pair.aligned_subject = vec![GAP_SYMBOL; cols];
            pair.operations = vec![TracebackOperation::Deletion; cols];
            pair.path = (1..=cols).rev().map(|j| Position::new(0, j)).collect();
        } else {
            pair.aligned_query = vec![GAP_SYMBOL; rows];
            pair.aligned_subject = ctx.subject().to_vec();
            pair.operations = vec![TracebackOperation::Insertion; rows];
            pair.path = (1..=rows).rev().map(|i| Position::new(i, 0)).collect();
        }
        pair
    }
}

fn step_back(pos: Position, direction: Direction) -> Option<Position> {
    match direction {
        Direction::Diagonal => Some(Position::new(pos.i.checked_sub(1)?, pos.j.checked_sub(1)?)),
        Direction::Up => Some(Position::new(pos.i.checked_sub(1)?, pos.j)),
        Direction::Left => Some(Position::new(pos.i, pos.j.checked_sub(1)?)),
        Direction::None => None,
    }
}

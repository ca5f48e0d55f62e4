//! Pairwise global (Needleman-Wunsch) and local (Smith-Waterman) alignment
//! with the score matrix filled one anti-diagonal at a time on a worker pool.

use std::path::PathBuf;

use rayon::prelude::*;
use thiserror::Error;

pub mod alignment_mode;
pub mod batch;
pub mod config;
pub mod context;
pub mod evaluator;
pub mod grid;
pub mod io;
pub mod report;
pub mod scheduler;
pub mod scoring;
pub mod traceback;

pub use crate::alignment_mode::{AlignmentMode, AlignmentParams};
pub use crate::batch::BatchAligner;
pub use crate::config::AlignerConfig;
pub use crate::context::AlignmentContext;
pub use crate::evaluator::CellEvaluator;
pub use crate::grid::{Cell, Direction, ScoreGrid};
pub use crate::scheduler::{Diagonal, DiagonalScheduler};
pub use crate::scoring::{AlignmentStats, BestRecord, BestScoreTracker, Candidate, Position};
pub use crate::traceback::{AlignedPair, Backtracker, TracebackOperation, GAP_SYMBOL};

/// Cell and final score type.
pub type Score = i64;

// Needleman-Wunsch defaults
pub const GLOBAL_MATCH: i32 = 5;
pub const GLOBAL_MISMATCH: i32 = -1;
pub const GLOBAL_GAP: i32 = -5;

// Smith-Waterman defaults
pub const LOCAL_MATCH: i32 = 2;
pub const LOCAL_MISMATCH: i32 = -2;
pub const LOCAL_GAP: i32 = -5;

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("scores of a {rows}x{cols} alignment with weight {weight} overflow i64")]
    ScoreOverflow { rows: usize, cols: usize, weight: u64 },
    #[error("a {rows}x{cols} score grid does not fit in memory")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("traceback error: {0}")]
    TracebackError(String),
    #[error("failed to read sequence from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AlignerError>;

#[derive(Debug, Clone, Default)]
pub struct AlignerParameters {
    alignment: AlignmentParams,
    config: AlignerConfig,
}

impl AlignerParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches mode and resets the weights to that mode's defaults.
    pub fn with_mode(mut self, mode: AlignmentMode) -> Self {
        self.alignment = AlignmentParams::for_mode(mode);
        self
    }

    pub fn with_alignment_params(mut self, params: AlignmentParams) -> Self {
        self.alignment = params;
        self
    }

    pub fn with_config(mut self, config: AlignerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.config = self.config.with_threads(threads);
        self
    }

    pub fn alignment(&self) -> &AlignmentParams {
        &self.alignment
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }
}

/// Runs alignments on a fixed pool of worker threads.
///
/// The aligner holds no per-run state, so one instance can serve any number
/// of alignments, including concurrently.
pub struct Aligner {
    params: AlignerParameters,
    pool: rayon::ThreadPool,
    threads: usize,
}

impl Aligner {
    pub fn new(params: AlignerParameters) -> Result<Self> {
        let threads = params.config.resolved_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("wavefront-{i}"))
            .build()?;
        log::debug!("worker pool ready with {threads} threads");

        Ok(Self {
            params,
            pool,
            threads,
        })
    }

    /// Worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params.alignment
    }

    pub(crate) fn pool(&self) -> &rayon::ThreadPool {
        &self.pool
    }

    pub fn align(&self, query: &[u8], subject: &[u8]) -> Result<AlignedPair> {
        self.align_with_grid(query, subject).map(|(pair, _)| pair)
    }

    /// Like [`Aligner::align`], also handing back the filled grid.
    pub fn align_with_grid(&self, query: &[u8], subject: &[u8]) -> Result<(AlignedPair, ScoreGrid)> {
        let ctx = AlignmentContext::new(query, subject, self.params.alignment)?;
        let mut grid = ScoreGrid::new(&ctx)?;
        log::debug!(
            "{} alignment of query {} x subject {}",
            ctx.mode(),
            ctx.cols(),
            ctx.rows()
        );

        if ctx.is_degenerate() {
            return Ok((Backtracker::degenerate(&ctx), grid));
        }

        let best = self.fill(&ctx, &mut grid);
        let (end, score) = match ctx.mode() {
            AlignmentMode::Global => {
                let end = Position::new(ctx.rows(), ctx.cols());
                (end, grid.score(end.i, end.j))
            }
            AlignmentMode::Local => (best.position, best.score),
        };

        let pair = Backtracker::new(&ctx, &grid).trace(end, score)?;
        log::debug!("score {} over {} columns ending at {}", pair.score, pair.len(), end);
        Ok((pair, grid))
    }

    /// Evaluates every interior cell, diagonal by diagonal. Returns the best
    /// Local record (the origin with score 0 in Global mode).
    fn fill(&self, ctx: &AlignmentContext<'_>, grid: &mut ScoreGrid) -> BestRecord {
        let scheduler = DiagonalScheduler::new(ctx.rows(), ctx.cols());
        let evaluator = CellEvaluator::new(ctx);
        let track_best = ctx.mode() == AlignmentMode::Local;
        let mut tracker = BestScoreTracker::new();
        let mut scratch = Vec::with_capacity(scheduler.max_diagonal_len());

        for diagonal in scheduler.diagonals() {
            let candidate =
                self.process_diagonal(&evaluator, grid, diagonal, &mut scratch, track_best);
            if track_best {
                tracker.offer(candidate);
            }
        }

        log::debug!(
            "filled {} diagonals, best record moved {} times",
            scheduler.total_diagonals(),
            tracker.updates()
        );
        tracker.best()
    }

    /// Evaluates one diagonal into `scratch`, then writes it to the grid.
    ///
    /// Workers only read the grid; writes happen after every worker has
    /// finished, which is the barrier before the next diagonal.
    fn process_diagonal(
        &self,
        evaluator: &CellEvaluator<'_>,
        grid: &mut ScoreGrid,
        diagonal: Diagonal,
        scratch: &mut Vec<Cell>,
        track_best: bool,
    ) -> Option<Candidate> {
        let len = diagonal.len();
        scratch.clear();
        scratch.resize(len, Cell::default());

        let best = if self.threads == 1 || len < self.params.config.min_parallel_cells {
            evaluate_chunk(evaluator, grid, &diagonal, 0, scratch, track_best)
        } else {
            let chunk = len.div_ceil(self.threads);
            let snapshot: &ScoreGrid = grid;
            self.pool.install(|| {
                scratch
                    .par_chunks_mut(chunk)
                    .enumerate()
                    .map(|(n, out)| {
                        evaluate_chunk(evaluator, snapshot, &diagonal, n * chunk, out, track_best)
                    })
                    .reduce(|| None, |a, b| match (a, b) {
                        (Some(a), Some(b)) => Some(a.better(b)),
                        (a, None) => a,
                        (None, b) => b,
                    })
            })
        };

        for (k, cell) in scratch.iter().enumerate() {
            let pos = diagonal.cell(k);
            grid.set(pos.i, pos.j, *cell);
        }
        best
    }
}

/// Evaluates cells `first..first + out.len()` of `diagonal`, returning the
/// chunk's best cell when tracking.
fn evaluate_chunk(
    evaluator: &CellEvaluator<'_>,
    grid: &ScoreGrid,
    diagonal: &Diagonal,
    first: usize,
    out: &mut [Cell],
    track_best: bool,
) -> Option<Candidate> {
    let mut best = None;
    for (offset, slot) in out.iter_mut().enumerate() {
        let k = first + offset;
        let pos = diagonal.cell(k);
        *slot = evaluator.evaluate(grid, pos.i, pos.j);
        if track_best {
            best = Candidate::merge(
                best,
                Candidate {
                    score: slot.score,
                    offset: k,
                    position: pos,
                },
            );
        }
    }
    best
}

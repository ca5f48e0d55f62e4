use crate::alignment_mode::{AlignmentMode, AlignmentParams};
use crate::grid::check_grid_size;
use crate::{AlignerError, Result};

/// Inputs of a single alignment run.
///
/// The query runs along the columns of the grid, the subject along the rows.
/// Nothing here changes once the context is built, so every stage of the run
/// borrows it read-only.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentContext<'a> {
    query: &'a [u8],
    subject: &'a [u8],
    params: AlignmentParams,
}

impl<'a> AlignmentContext<'a> {
    /// Builds a context, rejecting inputs whose scores or grid size would not
    /// fit the machine types used by the grid.
    pub fn new(query: &'a [u8], subject: &'a [u8], params: AlignmentParams) -> Result<Self> {
        let rows = subject.len();
        let cols = query.len();

        check_grid_size(rows, cols)?;

        check_score_bound(rows, cols, params.max_abs_weight())?;

        Ok(Self {
            query,
            subject,
            params,
        })
    }

    pub fn query(&self) -> &'a [u8] {
        self.query
    }

    pub fn subject(&self) -> &'a [u8] {
        self.subject
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params
    }

    pub fn mode(&self) -> AlignmentMode {
        self.params.mode
    }

    /// Number of subject symbols (interior rows).
    pub fn rows(&self) -> usize {
        self.subject.len()
    }

    /// Number of query symbols (interior columns).
    pub fn cols(&self) -> usize {
        self.query.len()
    }

    /// True when either sequence is empty and there is no interior to fill.
    pub fn is_degenerate(&self) -> bool {
        self.query.is_empty() || self.subject.is_empty()
    }
}

/// Any path through the grid takes at most `rows + cols` steps, so that many
/// maximal weights must fit in an `i64`.
fn check_score_bound(rows: usize, cols: usize, weight: u64) -> Result<()> {
    let bound = (rows as u64)
        .checked_add(cols as u64)
        .and_then(|steps| steps.checked_mul(weight));
    match bound {
        Some(b) if b <= i64::MAX as u64 => Ok(()),
        _ => Err(AlignerError::ScoreOverflow { rows, cols, weight }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_dimensions() {
        let ctx = AlignmentContext::new(b"ACGT", b"AC", AlignmentParams::default()).unwrap();
        assert_eq!(ctx.cols(), 4);
        assert_eq!(ctx.rows(), 2);
        assert!(!ctx.is_degenerate());
        assert_eq!(ctx.mode(), AlignmentMode::Global);
    }

    #[test]
    fn empty_side_is_degenerate() {
        let ctx = AlignmentContext::new(b"", b"ACGT", AlignmentParams::default()).unwrap();
        assert!(ctx.is_degenerate());
    }

    #[test]
    fn extreme_weights_on_short_input_are_accepted() {
        let query = vec![b'A'; 8];
        let params = AlignmentParams::default().with_gap(i32::MIN);
        assert!(AlignmentContext::new(&query, &query, params).is_ok());
    }

    #[test]
    fn score_bound_detects_overflow() {
        assert!(check_score_bound(1 << 20, 1 << 20, 1 << 31).is_ok());
        let err = check_score_bound(1 << 32, 1 << 32, 1 << 31).unwrap_err();
        assert!(matches!(err, AlignerError::ScoreOverflow { weight, .. } if weight == 1 << 31));
        assert!(check_score_bound(usize::MAX, usize::MAX, 1).is_err());
    }
}

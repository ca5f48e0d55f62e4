use crate::alignment_mode::{AlignmentMode, AlignmentParams};
use crate::context::AlignmentContext;
use crate::grid::{Cell, Direction, ScoreGrid};
use crate::Score;

/// Scores one interior cell from its three resolved neighbours.
///
/// Ties resolve Diagonal, then Up, then Left. In Local mode a best
/// neighbour of zero or less restarts the alignment: score 0, `Direction::None`.
#[derive(Debug, Clone, Copy)]
pub struct CellEvaluator<'a> {
    query: &'a [u8],
    subject: &'a [u8],
    params: AlignmentParams,
}

impl<'a> CellEvaluator<'a> {
    pub fn new(ctx: &AlignmentContext<'a>) -> Self {
        Self {
            query: ctx.query(),
            subject: ctx.subject(),
            params: *ctx.params(),
        }
    }

    /// Requires `1 <= i <= rows`, `1 <= j <= cols` and the Up, Left and
    /// Diagonal neighbours already written.
    #[inline]
    pub fn evaluate(&self, grid: &ScoreGrid, i: usize, j: usize) -> Cell {
        let gap = self.params.gap_score as Score;
        let sub = self.params.substitution(self.subject[i - 1], self.query[j - 1]) as Score;

        let diag = grid.score(i - 1, j - 1) + sub;
        let up = grid.score(i - 1, j) + gap;
        let left = grid.score(i, j - 1) + gap;

        let mut best = Cell::new(diag, Direction::Diagonal);
        if up > best.score {
            best = Cell::new(up, Direction::Up);
        }
        if left > best.score {
            best = Cell::new(left, Direction::Left);
        }

        if self.params.mode == AlignmentMode::Local && best.score <= 0 {
            return Cell::new(0, Direction::None);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mode: AlignmentMode) -> AlignmentParams {
        AlignmentParams::for_mode(mode)
            .with_match(1)
            .with_mismatch(-1)
            .with_gap(-1)
    }

    #[test]
    fn match_takes_the_diagonal() {
        let ctx = AlignmentContext::new(b"A", b"A", params(AlignmentMode::Global)).unwrap();
        let grid = ScoreGrid::new(&ctx).unwrap();
        let cell = CellEvaluator::new(&ctx).evaluate(&grid, 1, 1);
        assert_eq!(cell, Cell::new(1, Direction::Diagonal));
    }

    #[test]
    fn diagonal_wins_three_way_tie() {
        // diag = 0 + (-1), up = left = 0 + (-1) once the boundary is zeroed out.
        let ctx = AlignmentContext::new(b"A", b"C", params(AlignmentMode::Global)).unwrap();
        let mut grid = ScoreGrid::new(&ctx).unwrap();
        grid.set(0, 1, Cell::new(0, Direction::Left));
        grid.set(1, 0, Cell::new(0, Direction::Up));
        let cell = CellEvaluator::new(&ctx).evaluate(&grid, 1, 1);
        assert_eq!(cell, Cell::new(-1, Direction::Diagonal));
    }

    #[test]
    fn up_beats_left_on_tie() {
        let ctx = AlignmentContext::new(b"A", b"C", params(AlignmentMode::Global)).unwrap();
        let mut grid = ScoreGrid::new(&ctx).unwrap();
        grid.set(0, 0, Cell::new(-10, Direction::None));
        grid.set(0, 1, Cell::new(3, Direction::Left));
        grid.set(1, 0, Cell::new(3, Direction::Up));
        let cell = CellEvaluator::new(&ctx).evaluate(&grid, 1, 1);
        assert_eq!(cell, Cell::new(2, Direction::Up));
    }

    #[test]
    fn local_floors_at_zero_with_sentinel() {
        let ctx = AlignmentContext::new(b"A", b"C", params(AlignmentMode::Local)).unwrap();
        let grid = ScoreGrid::new(&ctx).unwrap();
        let cell = CellEvaluator::new(&ctx).evaluate(&grid, 1, 1);
        assert_eq!(cell, Cell::new(0, Direction::None));
    }

    #[test]
    fn local_keeps_positive_scores() {
        let ctx = AlignmentContext::new(b"G", b"G", params(AlignmentMode::Local)).unwrap();
        let grid = ScoreGrid::new(&ctx).unwrap();
        let cell = CellEvaluator::new(&ctx).evaluate(&grid, 1, 1);
        assert_eq!(cell, Cell::new(1, Direction::Diagonal));
    }
}

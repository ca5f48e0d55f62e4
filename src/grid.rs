use crate::alignment_mode::AlignmentMode;
use crate::context::AlignmentContext;
use crate::scoring::Position;
use crate::{AlignerError, Result, Score};

/// Predecessor chosen for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Direction {
    /// No predecessor: the origin, or a Local cell where the score restarted at zero.
    #[default]
    None = 0,
    Up = 1,
    Left = 2,
    Diagonal = 3,
}

impl Direction {
    pub fn symbol(self) -> char {
        match self {
            Direction::None => '-',
            Direction::Up => 'U',
            Direction::Left => 'L',
            Direction::Diagonal => 'D',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub score: Score,
    pub direction: Direction,
}

impl Cell {
    pub fn new(score: Score, direction: Direction) -> Self {
        Self { score, direction }
    }
}

/// Score and direction matrices of size `(rows + 1) x (cols + 1)`, stored
/// row-major in two parallel buffers.
#[derive(Debug, Clone)]
pub struct ScoreGrid {
    scores: Vec<Score>,
    directions: Vec<Direction>,
    rows: usize,
    cols: usize,
}

impl ScoreGrid {
    /// Allocates the grid for `ctx` and writes row 0 and column 0.
    ///
    /// Fails with [`AlignerError::GridTooLarge`] instead of aborting when the
    /// allocation cannot be satisfied.
    pub fn new(ctx: &AlignmentContext<'_>) -> Result<Self> {
        let too_large = || AlignerError::GridTooLarge {
            rows: ctx.rows(),
            cols: ctx.cols(),
        };
        let cells = check_grid_size(ctx.rows(), ctx.cols())?;

        let mut scores = Vec::new();
        scores.try_reserve_exact(cells).map_err(|_| too_large())?;
        scores.resize(cells, 0);
        let mut directions = Vec::new();
        directions.try_reserve_exact(cells).map_err(|_| too_large())?;
        directions.resize(cells, Direction::None);

        let mut grid = Self {
            scores,
            directions,
            rows: ctx.rows() + 1,
            cols: ctx.cols() + 1,
        };
        grid.initialize_boundary(ctx);
        Ok(grid)
    }

    fn initialize_boundary(&mut self, ctx: &AlignmentContext<'_>) {
        // Local boundaries stay at zero with no predecessor.
        if ctx.mode() == AlignmentMode::Local {
            return;
        }
        let gap = ctx.params().gap_score as Score;
        for i in 1..self.rows {
            self.set(i, 0, Cell::new(i as Score * gap, Direction::Up));
        }
        for j in 1..self.cols {
            self.set(0, j, Cell::new(j as Score * gap, Direction::Left));
        }
    }

    /// Number of rows including the boundary row.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns including the boundary column.
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    #[inline]
    pub fn score(&self, row: usize, col: usize) -> Score {
        self.scores[self.index(row, col)]
    }

    #[inline]
    pub fn direction(&self, row: usize, col: usize) -> Direction {
        self.directions[self.index(row, col)]
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        let idx = self.index(row, col);
        Cell::new(self.scores[idx], self.directions[idx])
    }

    #[inline]
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.cell(pos.i, pos.j)
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.scores[idx] = cell.score;
        self.directions[idx] = cell.direction;
    }

    /// Row-major view of one score row.
    pub fn score_row(&self, row: usize) -> &[Score] {
        let start = self.index(row, 0);
        &self.scores[start..start + self.cols]
    }
}

/// Bytes stored per cell: one score and one direction.
pub const CELL_BYTES: usize = std::mem::size_of::<Score>() + std::mem::size_of::<Direction>();

/// Cell count of the grid for `rows x cols` interior cells, if both
/// buffers stay addressable (at most `isize::MAX` bytes in total).
pub(crate) fn check_grid_size(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_add(1)
        .zip(cols.checked_add(1))
        .and_then(|(r, c)| r.checked_mul(c))
        .filter(|cells| {
            cells
                .checked_mul(CELL_BYTES)
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(AlignerError::GridTooLarge { rows, cols })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment_mode::AlignmentParams;

    #[test]
    fn global_boundary_is_gap_multiples() {
        let params = AlignmentParams::default().with_gap(-3);
        let ctx = AlignmentContext::new(b"ACGTA", b"TTG", params).unwrap();
        let grid = ScoreGrid::new(&ctx).unwrap();

        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 6);
        assert_eq!(grid.cell(0, 0), Cell::default());
        for i in 1..grid.rows() {
            assert_eq!(grid.score(i, 0), -3 * i as Score);
            assert_eq!(grid.direction(i, 0), Direction::Up);
        }
        for j in 1..grid.cols() {
            assert_eq!(grid.score(0, j), -3 * j as Score);
            assert_eq!(grid.direction(0, j), Direction::Left);
        }
    }

    #[test]
    fn local_boundary_is_zero() {
        let params = AlignmentParams::for_mode(AlignmentMode::Local);
        let ctx = AlignmentContext::new(b"ACG", b"ACGT", params).unwrap();
        let grid = ScoreGrid::new(&ctx).unwrap();

        for i in 0..grid.rows() {
            assert_eq!(grid.cell(i, 0), Cell::default());
        }
        assert!(grid.score_row(0).iter().all(|&s| s == 0));
    }

    #[test]
    fn set_and_get_are_row_major() {
        let ctx = AlignmentContext::new(b"AC", b"AC", AlignmentParams::default()).unwrap();
        let mut grid = ScoreGrid::new(&ctx).unwrap();
        grid.set(1, 2, Cell::new(7, Direction::Diagonal));

        assert_eq!(grid.cell_at(Position::new(1, 2)), Cell::new(7, Direction::Diagonal));
        assert_eq!(grid.score_row(1), &[-5, 0, 7]);
    }

    #[test]
    fn size_check_counts_bytes_not_just_cells() {
        assert_eq!(CELL_BYTES, 9);
        assert_eq!(check_grid_size(3, 5).unwrap(), 24);
        assert_eq!(check_grid_size(0, 0).unwrap(), 1);

        // 2^60 cells fit in usize but not at 9 bytes each.
        let side = (1usize << 30) - 1;
        assert!(side.checked_add(1).unwrap().checked_mul(side + 1).is_some());
        let err = check_grid_size(side, side).unwrap_err();
        assert!(matches!(err, AlignerError::GridTooLarge { rows, cols } if rows == side && cols == side));

        assert!(check_grid_size(usize::MAX, 1).is_err());
    }
}

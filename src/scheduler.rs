//! Anti-diagonal (wavefront) ordering of the interior cells.
//!
//! Cell `(i, j)` reads only cells whose `i + j` is smaller, so every cell on
//! one anti-diagonal can be evaluated independently once the previous two
//! diagonals are complete. Diagonals are numbered `1..=rows + cols - 1` over
//! the interior; diagonal `d` holds the cells with `i + j == d + 1`, walked
//! from the bottom-left (largest `i`) to the top-right.

use crate::scoring::Position;

/// One anti-diagonal of the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagonal {
    index: usize,
    len: usize,
    start: Position,
}

impl Diagonal {
    /// 1-based diagonal number.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First cell of the diagonal (largest row).
    pub fn start(&self) -> Position {
        self.start
    }

    /// The `k`-th cell, counting from 0.
    #[inline]
    pub fn cell(&self, k: usize) -> Position {
        debug_assert!(k < self.len, "cell {k} outside diagonal of {}", self.len);
        Position::new(self.start.i - k, self.start.j + k)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len).map(move |k| self.cell(k))
    }
}

/// Geometry of the wavefront for an interior of `rows x cols` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalScheduler {
    rows: usize,
    cols: usize,
}

impl DiagonalScheduler {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of interior diagonals; zero when either side is empty.
    pub fn total_diagonals(&self) -> usize {
        if self.rows == 0 || self.cols == 0 {
            0
        } else {
            self.rows + self.cols - 1
        }
    }

    /// Number of cells on diagonal `d`.
    ///
    /// Grows by one per diagonal, plateaus at the shorter side, then shrinks.
    /// The formulas use the full grid dimensions, boundary included.
    pub fn cell_count(&self, d: usize) -> usize {
        debug_assert!((1..=self.total_diagonals()).contains(&d));
        let r = self.rows + 1;
        let c = self.cols + 1;
        let short = r.min(c);
        let long = r.max(c);

        if d < short {
            d
        } else if d < long {
            short - 1
        } else {
            2 * short + r.abs_diff(c) - d - 2
        }
    }

    /// First cell of diagonal `d`: down column 1 until the last row is
    /// reached, then along the last row.
    pub fn first_cell(&self, d: usize) -> Position {
        debug_assert!((1..=self.total_diagonals()).contains(&d));
        let r = self.rows + 1;
        if d < r {
            Position::new(d, 1)
        } else {
            Position::new(r - 1, d + 2 - r)
        }
    }

    pub fn diagonal(&self, d: usize) -> Diagonal {
        Diagonal {
            index: d,
            len: self.cell_count(d),
            start: self.first_cell(d),
        }
    }

    /// Diagonals in dependency order.
    pub fn diagonals(&self) -> impl Iterator<Item = Diagonal> + '_ {
        (1..=self.total_diagonals()).map(move |d| self.diagonal(d))
    }

    /// Length of the longest diagonal.
    pub fn max_diagonal_len(&self) -> usize {
        self.rows.min(self.cols)
    }
}

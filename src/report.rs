//! Human-readable rendering of results and grids.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::grid::{Direction, ScoreGrid};
use crate::scoring::Position;
use crate::traceback::{AlignedPair, TracebackOperation};

const RULE: &str = "======================================";

/// Control bytes would break the column layout, so they print as '.'.
fn printable(symbol: u8) -> char {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        symbol as char
    } else {
        '.'
    }
}

fn render(symbols: &[u8]) -> String {
    symbols.iter().map(|&b| printable(b)).collect()
}

/// `|` for identical symbols, `*` for substitutions, space opposite a gap.
pub fn match_line(pair: &AlignedPair) -> String {
    pair.operations
        .iter()
        .map(|op| match op {
            TracebackOperation::Match => '|',
            TracebackOperation::Mismatch => '*',
            TracebackOperation::Insertion | TracebackOperation::Deletion => ' ',
        })
        .collect()
}

/// Summary block printed by the command-line tool.
pub struct Summary<'a> {
    pub pair: &'a AlignedPair,
    pub query_len: usize,
    pub subject_len: usize,
    pub elapsed: Duration,
    pub threads: usize,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.pair.stats();
        writeln!(f, "{RULE}")?;
        writeln!(f, "query length:     {}", self.query_len)?;
        writeln!(f, "subject length:   {}", self.subject_len)?;
        writeln!(f, "final score:      {}", self.pair.score)?;
        writeln!(f, "alignment length: {}", self.pair.len())?;
        writeln!(
            f,
            "identity:         {}/{} ({:.1}%), {} gaps",
            stats.matches,
            stats.length,
            stats.identity() * 100.0,
            stats.gaps
        )?;
        writeln!(f, "alignment ({} -> {}):", self.pair.start, self.pair.end)?;
        writeln!(f, "\t{}", render(&self.pair.aligned_query))?;
        writeln!(f, "\t{}", match_line(self.pair))?;
        writeln!(f, "\t{}", render(&self.pair.aligned_subject))?;
        writeln!(f, "time elapsed:     {:.3}s", self.elapsed.as_secs_f64())?;
        writeln!(f, "threads used:     {}", self.threads)?;
        write!(f, "{RULE}")
    }
}

/// Tab-separated score matrix, one grid row per line.
pub struct ScoreMatrix<'a>(pub &'a ScoreGrid);

impl fmt::Display for ScoreMatrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.0.rows() {
            let row: Vec<String> = self.0.score_row(i).iter().map(|s| s.to_string()).collect();
            writeln!(f, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}

/// Direction letters on the traceback path, `-` everywhere else.
pub struct PathMatrix<'a> {
    grid: &'a ScoreGrid,
    on_path: HashMap<Position, Direction>,
}

impl<'a> PathMatrix<'a> {
    pub fn new(grid: &'a ScoreGrid, pair: &AlignedPair) -> Self {
        let on_path = pair
            .path
            .iter()
            .map(|&pos| (pos, grid.cell_at(pos).direction))
            .collect();
        Self { grid, on_path }
    }
}

impl fmt::Display for PathMatrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.grid.rows() {
            let row: Vec<String> = (0..self.grid.cols())
                .map(|j| {
                    self.on_path
                        .get(&Position::new(i, j))
                        .map_or('-', |d| d.symbol())
                        .to_string()
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

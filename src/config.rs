use std::num::NonZeroUsize;

/// Diagonals shorter than this are evaluated on the calling thread.
pub const DEFAULT_MIN_PARALLEL_CELLS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignerConfig {
    /// Worker threads; 0 picks the machine's available parallelism.
    pub threads: usize,
    pub min_parallel_cells: usize,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            min_parallel_cells: DEFAULT_MIN_PARALLEL_CELLS,
        }
    }
}

impl AlignerConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Accepts a signed hint; anything non-positive means "use the default".
    pub fn with_thread_hint(mut self, hint: i64) -> Self {
        if hint <= 0 {
            log::warn!("thread count {hint} is not positive, using the default");
            self.threads = 0;
        } else {
            self.threads = usize::try_from(hint).unwrap_or(usize::MAX);
        }
        self
    }

    pub fn with_min_parallel_cells(mut self, cells: usize) -> Self {
        self.min_parallel_cells = cells;
        self
    }

    /// Thread count for the worker pool.
    ///
    /// Requests above twice the available cores are capped there, so a large
    /// hint never tries to spawn thousands of OS threads.
    pub fn resolved_threads(&self) -> usize {
        let available = available_threads();
        if self.threads == 0 {
            return available;
        }
        let max_threads = available.saturating_mul(2);
        if self.threads > max_threads {
            log::warn!(
                "thread count {} exceeds maximum {}, capping at {}",
                self.threads,
                max_threads,
                max_threads
            );
            max_threads
        } else {
            self.threads
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

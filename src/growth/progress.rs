//! Progress reporting for long simulation runs. The engine pushes row counts
//! into a sink at coarse intervals; nothing flows back into the simulation.

/// Receives coarse progress updates while the engine scans the interior.
/// Implementations must be `Sync`: rows are processed on rayon workers.
pub trait ProgressSink: Sync {
    fn rows_completed(&self, completed: usize, total: usize);
}

/// Discards all updates.
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn rows_completed(&self, _completed: usize, _total: usize) {}
}

/// Prints a status line every `every` completed rows, and once at the end.
pub struct ConsoleProgress {
    every: usize,
}

impl ConsoleProgress {
    pub fn new(every: usize) -> Self {
        ConsoleProgress {
            every: every.max(1),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        ConsoleProgress::new(500)
    }
}

impl ProgressSink for ConsoleProgress {
    fn rows_completed(&self, completed: usize, total: usize) {
        if completed % self.every == 0 || completed == total {
            println!("Simulated {}/{} rows", completed, total);
        }
    }
}

mod engine;
mod progress;

pub use engine::{GrowthEngine, DEFAULT_KERNEL_SIZE};
pub use progress::{ConsoleProgress, ProgressSink, SilentProgress};

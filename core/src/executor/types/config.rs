use std::path::PathBuf;

pub const MIN_PARALLELISM: usize = 1;
pub const MAX_PARALLELISM: usize = 10;

/// Effective concurrency for a requested value: zero and negatives become 1,
/// anything above 10 becomes 10.
pub fn clamp_parallelism(requested: i64) -> usize {
    requested.clamp(MIN_PARALLELISM as i64, MAX_PARALLELISM as i64) as usize
}

/// Execution options for one run.
#[derive(Debug, Clone)]
pub struct ExecutionOpts {
    /// Chunk size; always within `[1, 10]`.
    pub parallelism: usize,

    /// Directory every task's output filename is joined onto. Empty for
    /// single-shot commands, where the filename is already a full path.
    pub output_dir: PathBuf,

    /// Enable visual progress bar (disabled for jsonl output)
    pub progress_bar: bool,
}

impl ExecutionOpts {
    pub fn new(requested_parallelism: i64, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            parallelism: clamp_parallelism(requested_parallelism),
            output_dir: output_dir.into(),
            progress_bar: false,
        }
    }

    /// Options for a one-task command writing to an explicit path.
    pub fn single_shot() -> Self {
        Self::new(1, PathBuf::new())
    }

    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = enabled;
        self
    }
}

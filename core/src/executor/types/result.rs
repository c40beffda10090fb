use std::path::PathBuf;

use crate::error::{ErrorCode, TaskError};

/// Result of executing a single task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Zero-based position of the task in the input
    pub index: usize,

    /// Name used for reporting, set even when the task failed
    pub output_filename: String,

    /// Where the image was written (success only)
    pub output_path: Option<PathBuf>,

    pub success: bool,

    /// Error message, present iff `success` is false
    pub error: Option<String>,

    pub error_code: Option<ErrorCode>,

    /// Execution duration in milliseconds
    pub duration_ms: u64,

    /// Text the model returned next to the image
    pub notes: Option<String>,
}

impl TaskResult {
    pub fn succeeded(
        index: usize,
        output_filename: String,
        output_path: PathBuf,
        duration_ms: u64,
        notes: Option<String>,
    ) -> Self {
        Self {
            index,
            output_filename,
            output_path: Some(output_path),
            success: true,
            error: None,
            error_code: None,
            duration_ms,
            notes,
        }
    }

    pub fn failed(index: usize, output_filename: String, err: &TaskError, duration_ms: u64) -> Self {
        Self {
            index,
            output_filename,
            output_path: None,
            success: false,
            error: Some(err.to_string()),
            error_code: Some(err.error_code()),
            duration_ms,
            notes: None,
        }
    }
}

/// Aggregate over a whole run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,

    pub total: usize,

    pub succeeded: usize,

    pub failed: usize,

    /// Total execution duration in milliseconds
    pub duration_ms: u64,

    /// Results in completion order
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Result for the task at `index`.
    pub fn result_for(&self, index: usize) -> Option<&TaskResult> {
        self.results.iter().find(|r| r.index == index)
    }
}

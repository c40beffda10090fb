use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use super::types::{RunSummary, TaskResult};

/// Visual progress monitor for task execution
///
/// Provides an overall bar plus one spinner per in-flight task
pub struct ProgressMonitor {
    /// Multi-progress container
    multi: MultiProgress,
    /// Overall progress bar
    overall: ProgressBar,
    /// Per-task spinners keyed by task index
    task_bars: HashMap<usize, ProgressBar>,
    /// Whether monitoring is enabled
    enabled: bool,
}

impl ProgressMonitor {
    /// Create a new progress monitor
    ///
    /// # Arguments
    ///
    /// * `total_tasks` - Total number of tasks to execute
    /// * `enabled` - Whether to enable visual progress (disabled for jsonl output)
    pub fn new(total_tasks: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                multi: MultiProgress::new(),
                overall: ProgressBar::hidden(),
                task_bars: HashMap::new(),
                enabled: false,
            };
        }

        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(total_tasks as u64));
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} images ({percent}%) {msg}")
            .map(|s| s.progress_chars("█▓▒░  "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        overall.set_style(style);
        overall.set_message("Starting...");

        Self {
            multi,
            overall,
            task_bars: HashMap::new(),
            enabled: true,
        }
    }

    /// Add a task and create its progress spinner
    pub fn add_task(&mut self, index: usize, name: &str) {
        if !self.enabled {
            return;
        }

        let bar = self.multi.add(ProgressBar::new_spinner());
        let style = ProgressStyle::default_spinner()
            .template("  {spinner:.green} {msg}")
            .map(|s| s.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(format!("⏳ {}", name));
        bar.enable_steady_tick(Duration::from_millis(100));

        self.task_bars.insert(index, bar);
    }

    /// Mark a task as completed
    pub fn complete_task(&mut self, result: &TaskResult) {
        if !self.enabled {
            return;
        }

        if let Some(bar) = self.task_bars.remove(&result.index) {
            let icon = if result.success { "✅" } else { "❌" };
            bar.finish_with_message(format!(
                "{} {} ({}ms)",
                icon, result.output_filename, result.duration_ms
            ));
        }

        self.overall.inc(1);
    }

    /// Mark chunk progress
    pub fn update_chunk(&self, chunk_id: usize, total_chunks: usize) {
        if self.enabled {
            self.overall
                .set_message(format!("Chunk {}/{}", chunk_id + 1, total_chunks));
        }
    }

    /// Finish overall progress
    pub fn finish(&self, all_succeeded: bool) {
        if !self.enabled {
            return;
        }

        let msg = if all_succeeded {
            "✅ All images generated"
        } else {
            "❌ Some images failed"
        };

        self.overall.finish_with_message(msg.to_string());
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        for (_, bar) in self.task_bars.drain() {
            bar.finish_and_clear();
        }
    }
}

/// Aggregates results as they arrive. Owned by the single consumer that
/// drains each chunk, so counters need no synchronisation.
pub struct ResultReporter {
    total: usize,
    succeeded: usize,
    failed: usize,
    results: Vec<TaskResult>,
    monitor: ProgressMonitor,
}

impl ResultReporter {
    pub fn new(total: usize, progress_bar: bool) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            results: Vec::with_capacity(total),
            monitor: ProgressMonitor::new(total, progress_bar),
        }
    }

    pub fn monitor(&mut self) -> &mut ProgressMonitor {
        &mut self.monitor
    }

    /// Records one result and returns how many have completed so far.
    pub fn record(&mut self, result: TaskResult) -> usize {
        if result.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.monitor.complete_task(&result);
        self.results.push(result);
        self.results.len()
    }

    pub fn finish(self, run_id: &str, duration_ms: u64) -> RunSummary {
        self.monitor.finish(self.failed == 0);
        RunSummary {
            run_id: run_id.to_string(),
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            duration_ms,
            results: self.results,
        }
    }
}

use crate::executor::types::{RunSummary, TaskResult};

/// Output renderer plugin (controls how run progress is shown)
pub trait OutputRendererPlugin: Send + Sync {
    fn name(&self) -> &str;
    fn format(&self) -> &str;
    fn supports_streaming(&self) -> bool {
        false
    }
    fn render(&self, event: &RenderEvent);
}

/// Render event (unified event type)
#[derive(Debug, Clone)]
pub enum RenderEvent {
    RunStart {
        run_id: String,
        total_tasks: usize,
        total_chunks: usize,
        parallelism: usize,
        output_dir: String,
    },
    Warning {
        run_id: String,
        task_index: Option<usize>,
        kind: String,
        message: String,
    },
    ChunkStart {
        run_id: String,
        chunk_id: usize,
        task_indexes: Vec<usize>,
    },
    TaskComplete {
        run_id: String,
        /// Results received so far, this one included.
        completed: usize,
        total: usize,
        result: TaskResult,
    },
    ChunkEnd {
        run_id: String,
        chunk_id: usize,
    },
    RunEnd {
        run_id: String,
        summary: RunSummary,
    },
}

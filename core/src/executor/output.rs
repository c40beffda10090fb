//! Fallback emitters used when no renderer plugin is attached. Everything
//! goes to `tracing` so library callers still get a record of the run.

use crate::task::Diagnostic;

use super::types::{RunSummary, TaskResult};

pub fn emit_run_start(
    run_id: &str,
    total_tasks: usize,
    total_chunks: usize,
    parallelism: usize,
    output_dir: &str,
) {
    tracing::info!(
        run_id = %run_id,
        total_tasks,
        total_chunks,
        parallelism,
        output_dir = %output_dir,
        "run started"
    );
}

pub fn emit_warning(run_id: &str, diagnostic: &Diagnostic) {
    tracing::warn!(
        run_id = %run_id,
        task = ?diagnostic.task_index(),
        kind = diagnostic.kind(),
        "{}",
        diagnostic
    );
}

pub fn emit_chunk_start(run_id: &str, chunk_id: usize, task_indexes: &[usize]) {
    tracing::debug!(run_id = %run_id, chunk_id, tasks = ?task_indexes, "chunk started");
}

pub fn emit_task_complete(run_id: &str, completed: usize, total: usize, result: &TaskResult) {
    if result.success {
        tracing::info!(
            run_id = %run_id,
            task = result.index,
            progress = %format!("{completed}/{total}"),
            output = %result.output_filename,
            duration_ms = result.duration_ms,
            "task succeeded"
        );
    } else {
        tracing::warn!(
            run_id = %run_id,
            task = result.index,
            progress = %format!("{completed}/{total}"),
            output = %result.output_filename,
            error = result.error.as_deref().unwrap_or(""),
            "task failed"
        );
    }
}

pub fn emit_chunk_end(run_id: &str, chunk_id: usize) {
    tracing::debug!(run_id = %run_id, chunk_id, "chunk finished");
}

pub fn emit_run_end(run_id: &str, summary: &RunSummary) {
    tracing::info!(
        run_id = %run_id,
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        duration_ms = summary.duration_ms,
        "run finished"
    );
}

use std::future::Future;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::task::JoinError;

use crate::error::TaskError;

use super::types::{TaskLike, TaskResult};

/// Splits `items` into consecutive chunks of `limit` (the last may be
/// shorter). A zero limit is treated as 1.
pub fn partition<T>(items: Vec<T>, limit: usize) -> Vec<Vec<T>> {
    let limit = limit.max(1);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(limit));
    let mut current = Vec::with_capacity(limit);
    for item in items {
        current.push(item);
        if current.len() == limit {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(limit)));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Execute a single chunk of tasks concurrently
///
/// Every task is spawned onto the runtime, so a panic inside one task turns
/// into a failed result for that task only. Results are handed to
/// `on_complete` in completion order and returned in the same order. The
/// function returns only once every task in the chunk has finished.
pub async fn execute_chunk<T, F, Fut, C>(
    chunk: Vec<T>,
    executor_fn: F,
    mut on_complete: C,
) -> Vec<TaskResult>
where
    T: TaskLike,
    F: Fn(T) -> Fut,
    Fut: Future<Output = TaskResult> + Send + 'static,
    C: FnMut(&TaskResult),
{
    let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

    for task in chunk {
        let index = task.index();
        let output_filename = task.output_filename().to_string();
        let handle = tokio::spawn(executor_fn(task));

        futs.push(async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    let err = TaskError::Panicked(join_error_message(e));
                    tracing::error!(task = index, error = %err, "task aborted");
                    TaskResult::failed(index, output_filename, &err, 0)
                }
            }
        });
    }

    let mut results = Vec::with_capacity(futs.len());
    while let Some(result) = futs.next().await {
        on_complete(&result);
        results.push(result);
    }
    results
}

fn join_error_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "task was cancelled".to_string();
    }
    match err.try_into_panic() {
        Ok(payload) => {
            if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            }
        }
        Err(e) => e.to_string(),
    }
}

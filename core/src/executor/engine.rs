use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::error::TaskError;
use crate::files::{decode_artifact, output_path_in, write_output, InputFileResolver};
use crate::generation::{GenerationRequest, ImageGenerator, InlineImage};
use crate::task::{BatchPlan, Diagnostic, PlanEntry, TaskDescriptor};

use super::output::{
    emit_chunk_end, emit_chunk_start, emit_run_end, emit_run_start, emit_task_complete,
    emit_warning,
};
use super::progress::ResultReporter;
use super::scheduler::{execute_chunk, partition};
use super::traits::{OutputRendererPlugin, RenderEvent};
use super::types::{ExecutionOpts, RunSummary, TaskResult};

/// Everything a spawned task needs. Shared read-only across a chunk.
struct TaskContext {
    generator: Arc<dyn ImageGenerator>,
    resolver: Arc<InputFileResolver>,
    output_dir: PathBuf,
}

/// What a successful task produced.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub output_path: PathBuf,
    pub notes: Option<String>,
}

/// Execution engine for chunked batch runs
pub struct ExecutionEngine {
    generator: Arc<dyn ImageGenerator>,
    resolver: Arc<InputFileResolver>,
    opts: ExecutionOpts,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
}

pub struct ExecutionEngineBuilder {
    generator: Arc<dyn ImageGenerator>,
    resolver: Option<Arc<InputFileResolver>>,
    opts: ExecutionOpts,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
}

impl ExecutionEngine {
    pub fn builder(generator: Arc<dyn ImageGenerator>, opts: ExecutionOpts) -> ExecutionEngineBuilder {
        ExecutionEngineBuilder::new(generator, opts)
    }

    pub fn opts(&self) -> &ExecutionOpts {
        &self.opts
    }

    /// Runs every entry of the plan and returns one result per entry.
    ///
    /// Entries are split into consecutive chunks of `opts.parallelism`.
    /// Tasks inside a chunk run concurrently; the next chunk starts only
    /// after every task of the current one has finished. Failures are
    /// captured per task and never stop the run.
    pub async fn execute_plan(&self, plan: BatchPlan) -> RunSummary {
        let run_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let (entries, diagnostics) = plan.into_parts();
        let total = entries.len();

        let chunks = partition(entries, self.opts.parallelism);
        let total_chunks = chunks.len();

        self.emit_run_start(&run_id, total, total_chunks);
        for diagnostic in &diagnostics {
            self.emit_warning(&run_id, diagnostic);
        }

        let ctx = Arc::new(TaskContext {
            generator: self.generator.clone(),
            resolver: self.resolver.clone(),
            output_dir: self.opts.output_dir.clone(),
        });
        let mut reporter = ResultReporter::new(total, self.opts.progress_bar);

        for (chunk_id, chunk) in chunks.into_iter().enumerate() {
            let task_indexes: Vec<usize> = chunk.iter().map(|e| e.index()).collect();
            self.emit_chunk_start(&run_id, chunk_id, &task_indexes);

            reporter.monitor().update_chunk(chunk_id, total_chunks);
            for entry in &chunk {
                reporter.monitor().add_task(entry.index(), entry.output_filename());
            }

            let executor_fn = {
                let ctx = ctx.clone();
                let run_id = run_id.clone();
                move |entry: PlanEntry| run_entry(ctx.clone(), run_id.clone(), entry)
            };

            execute_chunk(chunk, executor_fn, |result| {
                let completed = reporter.record(result.clone());
                self.emit_task_complete(&run_id, completed, total, result.clone());
            })
            .await;

            self.emit_chunk_end(&run_id, chunk_id);
        }

        let summary = reporter.finish(&run_id, start.elapsed().as_millis() as u64);
        self.emit_run_end(&run_id, &summary);
        summary
    }

    fn emit_run_start(&self, run_id: &str, total_tasks: usize, total_chunks: usize) {
        let output_dir = self.opts.output_dir.display().to_string();
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::RunStart {
                run_id: run_id.to_string(),
                total_tasks,
                total_chunks,
                parallelism: self.opts.parallelism,
                output_dir,
            });
        } else {
            emit_run_start(run_id, total_tasks, total_chunks, self.opts.parallelism, &output_dir);
        }
    }

    fn emit_warning(&self, run_id: &str, diagnostic: &Diagnostic) {
        if let Some(renderer) = &self.renderer {
            tracing::debug!(run_id = %run_id, kind = diagnostic.kind(), "{}", diagnostic);
            renderer.render(&RenderEvent::Warning {
                run_id: run_id.to_string(),
                task_index: diagnostic.task_index(),
                kind: diagnostic.kind().to_string(),
                message: diagnostic.to_string(),
            });
        } else {
            emit_warning(run_id, diagnostic);
        }
    }

    fn emit_chunk_start(&self, run_id: &str, chunk_id: usize, task_indexes: &[usize]) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::ChunkStart {
                run_id: run_id.to_string(),
                chunk_id,
                task_indexes: task_indexes.to_vec(),
            });
        } else {
            emit_chunk_start(run_id, chunk_id, task_indexes);
        }
    }

    fn emit_task_complete(&self, run_id: &str, completed: usize, total: usize, result: TaskResult) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::TaskComplete {
                run_id: run_id.to_string(),
                completed,
                total,
                result,
            });
        } else {
            emit_task_complete(run_id, completed, total, &result);
        }
    }

    fn emit_chunk_end(&self, run_id: &str, chunk_id: usize) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::ChunkEnd {
                run_id: run_id.to_string(),
                chunk_id,
            });
        } else {
            emit_chunk_end(run_id, chunk_id);
        }
    }

    fn emit_run_end(&self, run_id: &str, summary: &RunSummary) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::RunEnd {
                run_id: run_id.to_string(),
                summary: summary.clone(),
            });
        } else {
            emit_run_end(run_id, summary);
        }
    }
}

impl ExecutionEngineBuilder {
    pub fn new(generator: Arc<dyn ImageGenerator>, opts: ExecutionOpts) -> Self {
        Self {
            generator,
            resolver: None,
            opts,
            renderer: None,
        }
    }

    pub fn resolver(mut self, resolver: InputFileResolver) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn OutputRendererPlugin>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn build(self) -> ExecutionEngine {
        let resolver = self.resolver.unwrap_or_else(|| {
            let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Arc::new(InputFileResolver::with_default_paths(base))
        });

        ExecutionEngine {
            generator: self.generator,
            resolver,
            opts: self.opts,
            renderer: self.renderer,
        }
    }
}

async fn run_entry(ctx: Arc<TaskContext>, run_id: String, entry: PlanEntry) -> TaskResult {
    let task = match entry {
        PlanEntry::Ready(task) => task,
        PlanEntry::Rejected(rejected) => {
            return TaskResult::failed(
                rejected.index,
                rejected.output_filename,
                &rejected.error,
                0,
            );
        }
    };

    let start = Instant::now();
    let index = task.index;
    let output_filename = task.output_filename.clone();

    match run_task(&ctx, task).await {
        Ok(outcome) => TaskResult::succeeded(
            index,
            output_filename,
            outcome.output_path,
            start.elapsed().as_millis() as u64,
            outcome.notes,
        ),
        Err(err) => {
            tracing::debug!(
                run_id = %run_id,
                task = index,
                code = err.error_code().as_str(),
                error = %err,
                "task failed"
            );
            TaskResult::failed(index, output_filename, &err, start.elapsed().as_millis() as u64)
        }
    }
}

/// The per-task pipeline: resolve references, call the collaborator, extract
/// the first image, decode it and write it out.
async fn run_task(ctx: &TaskContext, task: TaskDescriptor) -> Result<TaskOutcome, TaskError> {
    // Every reference must resolve before any file is read.
    let found = task
        .reference_images
        .iter()
        .map(|reference| ctx.resolver.resolve(reference).require())
        .collect::<Result<Vec<_>, _>>()?;

    let mut images = Vec::with_capacity(found.len());
    for reference in found {
        let data = tokio::fs::read(&reference.path)
            .await
            .map_err(|source| TaskError::ReferenceRead {
                path: reference.path.clone(),
                source,
            })?;
        images.push(InlineImage {
            media_type: reference.content_type.to_string(),
            data,
        });
    }

    let request = GenerationRequest {
        model_id: task.model.model_id().to_string(),
        prompt: task.prompt,
        images,
        aspect_ratio: task.aspect_ratio.map(str::to_string),
        image_size: task.resolution.map(|r| r.as_str().to_string()),
    };
    tracing::debug!(
        task = task.index,
        model = %request.model_id,
        mode = request.mode().as_str(),
        images = request.images.len(),
        "calling generator"
    );

    let response = ctx
        .generator
        .generate(request)
        .await
        .map_err(TaskError::collaborator)?;

    let file = response.first_image().ok_or(TaskError::NoImage)?;
    let bytes = decode_artifact(file)?;

    let output_path = output_path_in(&ctx.output_dir, &task.output_filename)?;
    write_output(&output_path, &bytes).await?;

    Ok(TaskOutcome {
        output_path,
        notes: response.text.filter(|t| !t.trim().is_empty()),
    })
}

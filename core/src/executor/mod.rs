//! Chunked job runner
//!
//! Executes a `BatchPlan` with bounded concurrency:
//! - Entries are split into consecutive chunks of `parallelism` (1..=10)
//! - Tasks in a chunk run concurrently, each on its own spawned task
//! - A chunk finishes completely before the next one starts
//! - Results are reported in completion order through a renderer plugin
//!
//! # Architecture
//!
//! ```text
//! BatchPlan
//!   ↓
//! partition() → Vec<Vec<PlanEntry>> (chunks)
//!   ↓
//! execute_chunk() → resolve → generate → decode → write
//!   ↓
//! ResultReporter → RunSummary
//! ```

mod engine;
mod output;
mod progress;
mod scheduler;
pub mod traits;
pub mod types;

pub use engine::{ExecutionEngine, ExecutionEngineBuilder, TaskOutcome};
pub use progress::{ProgressMonitor, ResultReporter};
pub use scheduler::{execute_chunk, partition};
pub use traits::{OutputRendererPlugin, RenderEvent};
pub use types::{
    clamp_parallelism, ExecutionOpts, RunSummary, TaskLike, TaskResult, MAX_PARALLELISM,
    MIN_PARALLELISM,
};

//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `imggen_core::api` instead of reaching into internal modules.

pub use crate::config::{
    default_search_paths, load_default, load_from_path, AppConfig, BatchConfig, GatewayConfig,
    GenerationConfig, LoggingConfig, SearchConfig,
};
pub use crate::error::{CliError, ErrorCode, InputError, TaskError};
pub use crate::executor::{
    clamp_parallelism, ExecutionEngine, ExecutionOpts, OutputRendererPlugin,
    RenderEvent, RunSummary, TaskResult,
};
pub use crate::files::{decode_artifact, output_path_in, write_output, InputFileResolver, ResolvedReference};
pub use crate::generation::{
    ArtifactData, GeneratedFile, GenerationMode, GenerationRequest, GenerationResponse,
    ImageGenerator, InlineImage,
};
pub use crate::input::{InputFormat, ParsedPromptSet, PromptSetParser};
pub use crate::task::{
    default_batch_dir, default_edit_output, default_generate_output, edit_instruction, non_blank,
    normalize, BatchPlan, Diagnostic, ModelKey, PlanEntry, RawTaskRecord, Resolution, RunDefaults,
    TaskDescriptor,
};

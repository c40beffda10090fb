//! CLI wiring: credential lookup, engine assembly and the single-shot flow
//! shared by `generate` and `edit`.
use std::path::Path;
use std::sync::Arc;

use imggen_core::api::{
    AppConfig, BatchPlan, CliError, ExecutionEngine, ExecutionOpts, ImageGenerator,
    InputFileResolver, OutputRendererPlugin, PlanEntry,
};
use imggen_plugins::factory;

use crate::commands::cli::GlobalArgs;
use crate::utils::{expand_path, parse_env_file};

const DEFAULT_ENV_FILE: &str = ".env";
const PROMPT_PREVIEW_CHARS: usize = 100;

/// Finds the gateway credential: process environment first, then the env
/// file. A missing or blank value is fatal before any task runs.
pub fn require_credential<F>(
    cfg: &AppConfig,
    env_file: Option<&str>,
    lookup: F,
) -> Result<String, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = cfg.gateway.api_key_env.as_str();
    let blank_to_none = |v: String| {
        let trimmed = v.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    };

    if let Some(key) = lookup(var).and_then(blank_to_none) {
        return Ok(key);
    }

    let from_file = match env_file {
        Some(path) => parse_env_file(&expand_path(path))?,
        None if Path::new(DEFAULT_ENV_FILE).is_file() => {
            parse_env_file(Path::new(DEFAULT_ENV_FILE))?
        }
        None => Vec::new(),
    };

    from_file
        .into_iter()
        .rev()
        .find(|(k, _)| k == var)
        .and_then(|(_, v)| blank_to_none(v))
        .ok_or_else(|| CliError::MissingCredential {
            var: var.to_string(),
        })
}

pub fn resolver(cfg: &AppConfig) -> Result<InputFileResolver, CliError> {
    Ok(InputFileResolver::from_current_dir(cfg.search.paths.clone())?)
}

pub fn build_engine(
    resolver: InputFileResolver,
    generator: Arc<dyn ImageGenerator>,
    opts: ExecutionOpts,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
) -> ExecutionEngine {
    let mut builder = ExecutionEngine::builder(generator, opts).resolver(resolver);
    if let Some(renderer) = renderer {
        builder = builder.renderer(renderer);
    }
    builder.build()
}

/// Lines describing a single-shot task before the model is called.
/// Rejected tasks get no summary; their error is reported instead.
pub fn task_summary(plan: &BatchPlan, resolver: &InputFileResolver) -> Vec<String> {
    let Some(PlanEntry::Ready(task)) = plan.entries().first() else {
        return Vec::new();
    };

    let mut lines = vec![format!(
        "Model: {} ({})",
        task.model.key(),
        task.model.model_id()
    )];
    if let Some(resolution) = task.resolution {
        lines.push(format!("Resolution: {}", resolution.as_str()));
    }
    if let Some(ratio) = task.aspect_ratio {
        lines.push(format!("Aspect ratio: {}", ratio));
    }
    for reference in &task.reference_images {
        let resolved = resolver.resolve(reference);
        match &resolved.found_path {
            Some(path) => lines.push(format!("Reference: {}", path.display())),
            None => lines.push(format!("Reference: {} (not found)", reference)),
        }
    }
    lines.push(format!("Prompt: {}", preview(&task.prompt, PROMPT_PREVIEW_CHARS)));
    lines
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Runs a one-task plan. Any task failure becomes a process-level error so
/// the command exits non-zero.
pub async fn run_single(
    cfg: &AppConfig,
    global: &GlobalArgs,
    generator: Arc<dyn ImageGenerator>,
    plan: BatchPlan,
    banner: &str,
) -> Result<i32, CliError> {
    let jsonl = global.is_jsonl();
    let resolver = resolver(cfg)?;

    if !jsonl {
        println!("{}", banner);
        for line in task_summary(&plan, &resolver) {
            println!("  {}", line);
        }
    }

    let renderer = jsonl.then(|| factory::build_renderer(global.stream_format.as_str(), global.ascii));
    let engine = build_engine(resolver, generator, ExecutionOpts::single_shot(), renderer);

    let summary = engine.execute_plan(plan).await;
    let result = summary
        .results
        .into_iter()
        .next()
        .ok_or_else(|| CliError::TaskFailed("no task was run".to_string()))?;

    if !result.success {
        return Err(CliError::TaskFailed(
            result.error.unwrap_or_else(|| "task failed".to_string()),
        ));
    }

    if !jsonl {
        if let Some(path) = &result.output_path {
            println!("Image saved: {}", path.display());
        }
        if let Some(notes) = &result.notes {
            println!("Model notes: {}", notes);
        }
    }
    Ok(0)
}

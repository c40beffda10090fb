use std::path::Path;

use chrono::Utc;
use imggen_core::api::{
    default_edit_output, edit_instruction, non_blank, normalize, AppConfig, BatchPlan, CliError,
    RawTaskRecord, RunDefaults,
};
use imggen_plugins::factory;

use crate::app;
use crate::commands::cli::{EditArgs, GlobalArgs};
use crate::utils::expand_path;

pub async fn run(args: EditArgs, global: &GlobalArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let api_key = app::require_credential(cfg, global.env_file.as_deref(), |k| {
        std::env::var(k).ok()
    })?;
    // Edits keep the source framing unless the user asks for a size.
    let (defaults, diagnostics) = RunDefaults::from_config(&cfg.generation, None)?;
    let defaults = defaults.without_size_defaults();
    let output = match args.output.as_deref().and_then(non_blank) {
        Some(path) => expand_path(&path),
        None => default_edit_output(Path::new(&cfg.batch.output_root), Utc::now()),
    };
    let banner = format!("Editing {} image(s)...", args.images.len());

    let mut plan = edit_plan(args, &defaults, output.display().to_string());
    plan.prepend_diagnostics(diagnostics);
    let generator = factory::build_generator(cfg, api_key)?;
    app::run_single(cfg, global, generator, plan, &banner).await
}

fn edit_plan(args: EditArgs, defaults: &RunDefaults, output: String) -> BatchPlan {
    let images: Vec<String> = args.images.iter().filter_map(|s| non_blank(s)).collect();
    // A blank instruction stays blank so the task is rejected as prompt-less.
    let prompt = match non_blank(&args.prompt) {
        Some(instruction) => edit_instruction(&instruction, images.len()),
        None => String::new(),
    };
    let record = RawTaskRecord {
        prompt,
        output_filename: Some(output.clone()),
        model: args.model.as_deref().and_then(non_blank),
        resolution: args.resolution.as_deref().and_then(non_blank),
        aspect_ratio: args.aspect_ratio.as_deref().and_then(non_blank),
        style: None,
        reference_images: images,
    };

    let mut plan = BatchPlan::default();
    let (entry, diagnostics) = normalize(record, 0, defaults, output);
    plan.push(entry, diagnostics);
    plan
}

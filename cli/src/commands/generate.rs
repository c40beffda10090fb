use std::path::Path;

use chrono::Utc;
use imggen_core::api::{
    default_generate_output, non_blank, normalize, AppConfig, BatchPlan, CliError, RawTaskRecord,
    RunDefaults,
};
use imggen_plugins::factory;

use crate::app;
use crate::commands::cli::{GenerateArgs, GlobalArgs};
use crate::utils::expand_path;

pub async fn run(
    args: GenerateArgs,
    global: &GlobalArgs,
    cfg: &AppConfig,
) -> Result<i32, CliError> {
    let api_key = app::require_credential(cfg, global.env_file.as_deref(), |k| {
        std::env::var(k).ok()
    })?;
    let (defaults, diagnostics) = RunDefaults::from_config(&cfg.generation, None)?;
    let output = match args.output.as_deref().and_then(non_blank) {
        Some(path) => expand_path(&path),
        None => default_generate_output(Path::new(&cfg.batch.output_root), Utc::now()),
    };
    let banner = if args.images.is_empty() {
        "Generating image..."
    } else {
        "Generating image from references..."
    };

    let mut plan = single_plan(args, &defaults, output.display().to_string());
    plan.prepend_diagnostics(diagnostics);
    let generator = factory::build_generator(cfg, api_key)?;
    app::run_single(cfg, global, generator, plan, banner).await
}

fn single_plan(args: GenerateArgs, defaults: &RunDefaults, output: String) -> BatchPlan {
    let record = RawTaskRecord {
        prompt: args.prompt,
        output_filename: Some(output.clone()),
        model: args.model.as_deref().and_then(non_blank),
        resolution: args.resolution.as_deref().and_then(non_blank),
        aspect_ratio: args.aspect_ratio.as_deref().and_then(non_blank),
        style: args.style.as_deref().and_then(non_blank),
        reference_images: args.images.iter().filter_map(|s| non_blank(s)).collect(),
    };

    let mut plan = BatchPlan::default();
    let (entry, diagnostics) = normalize(record, 0, defaults, output);
    plan.push(entry, diagnostics);
    plan
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use imggen_core::api::{
    default_batch_dir, non_blank, AppConfig, BatchPlan, CliError, Diagnostic, ExecutionOpts,
    ImageGenerator, ParsedPromptSet, PromptSetParser, RunDefaults,
};
use imggen_plugins::factory;

use crate::app;
use crate::commands::cli::{BatchArgs, GlobalArgs};
use crate::utils::expand_path;

/// Runs a prompt document. Per-task failures are reported, not fatal: the
/// command exits 0 once the run completes.
pub async fn run(args: BatchArgs, global: &GlobalArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let api_key = app::require_credential(cfg, global.env_file.as_deref(), |k| {
        std::env::var(k).ok()
    })?;
    let generator = factory::build_generator(cfg, api_key)?;
    execute(args, global, cfg, generator).await
}

pub async fn execute(
    args: BatchArgs,
    global: &GlobalArgs,
    cfg: &AppConfig,
    generator: Arc<dyn ImageGenerator>,
) -> Result<i32, CliError> {
    let (defaults, diagnostics) = RunDefaults::from_config(&cfg.generation, args.model.as_deref())?;

    let input = expand_path(&args.input);
    let parsed = PromptSetParser::load(&input).await?;
    let plan = build_plan(parsed, &defaults, diagnostics)?;

    let output_dir = output_dir(&args, cfg);
    tokio::fs::create_dir_all(&output_dir).await?;
    let parallelism = args.parallelism.unwrap_or(cfg.batch.parallelism);

    tracing::info!(
        input = %input.display(),
        tasks = plan.len(),
        rejected = plan.len() - plan.ready_count(),
        parallelism,
        output_dir = %output_dir.display(),
        "batch loaded"
    );
    if !global.is_jsonl() {
        println!("Batch input: {}", input.display());
        println!(
            "Default model: {} ({})",
            defaults.model.key(),
            defaults.model.model_id()
        );
    }

    let renderer = factory::build_renderer(global.stream_format.as_str(), global.ascii);
    let opts = ExecutionOpts::new(parallelism, &output_dir)
        .with_progress_bar(global.progress && !global.is_jsonl());
    let engine = app::build_engine(app::resolver(cfg)?, generator, opts, Some(renderer));

    let summary = engine.execute_plan(plan).await;
    tracing::info!(
        run_id = %summary.run_id,
        succeeded = summary.succeeded,
        failed = summary.failed,
        duration_ms = summary.duration_ms,
        "batch finished"
    );
    Ok(0)
}

fn build_plan(
    parsed: ParsedPromptSet,
    defaults: &RunDefaults,
    mut diagnostics: Vec<Diagnostic>,
) -> Result<BatchPlan, CliError> {
    if parsed.is_empty() {
        return Err(CliError::EmptyBatch);
    }
    diagnostics.extend(parsed.diagnostics);
    let mut plan = BatchPlan::from_records(parsed.records, defaults);
    plan.prepend_diagnostics(diagnostics);
    Ok(plan)
}

fn output_dir(args: &BatchArgs, cfg: &AppConfig) -> PathBuf {
    match args.output.as_deref().and_then(non_blank) {
        Some(dir) => expand_path(&dir),
        None => default_batch_dir(Path::new(&cfg.batch.output_root), Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gateway, PNG_SIGNATURE};
    use imggen_core::api::{GenerationConfig, InputFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_is_structural() {
        let parsed = PromptSetParser::parse("[]", InputFormat::Json).unwrap();
        let err = build_plan(parsed, &RunDefaults::default(), Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::EmptyBatch));
    }

    #[test]
    fn test_default_diagnostics_come_first() {
        let cfg = GenerationConfig {
            default_resolution: "8K".into(),
            ..GenerationConfig::default()
        };
        let (defaults, diagnostics) = RunDefaults::from_config(&cfg, None).unwrap();
        let parsed =
            PromptSetParser::parse("prompt,filename\nfox,fox.png\n,blank.png\n", InputFormat::Csv)
                .unwrap();

        let plan = build_plan(parsed, &defaults, diagnostics).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.diagnostics().len(), 2);
        assert!(matches!(
            plan.diagnostics()[0],
            Diagnostic::UnknownResolution { task: None, .. }
        ));
        assert_eq!(
            plan.diagnostics()[1],
            Diagnostic::BlankPromptDropped { line: 3 }
        );
    }

    #[test]
    fn test_output_dir_defaults_under_output_root() {
        let args = BatchArgs {
            input: "p.json".into(),
            output: None,
            parallelism: None,
            model: None,
        };
        let dir = output_dir(&args, &AppConfig::default());
        assert!(dir.starts_with("public/images"));
        assert!(dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("batch-"));

        let explicit = BatchArgs {
            output: Some("renders".into()),
            ..args
        };
        assert_eq!(output_dir(&explicit, &AppConfig::default()), PathBuf::from("renders"));
    }

    #[tokio::test]
    async fn test_partial_failure_still_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prompts.json");
        std::fs::write(
            &input,
            r#"[{"prompt":"a lighthouse","filename":"ok.png"},{"prompt":"a volcano","filename":"boom.png"}]"#,
        )
        .unwrap();
        let out = dir.path().join("out");
        let (_server, cfg) = gateway().await;
        let generator = factory::build_generator(&cfg, "key".into()).unwrap();

        let args = BatchArgs {
            input: input.display().to_string(),
            output: Some(out.display().to_string()),
            parallelism: Some(2),
            model: None,
        };
        let code = execute(args, &GlobalArgs::default(), &cfg, generator)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(std::fs::read(out.join("ok.png")).unwrap(), PNG_SIGNATURE);
        assert!(!out.join("boom.png").exists());
    }

    #[tokio::test]
    async fn test_unknown_default_model_stops_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prompts.csv");
        std::fs::write(&input, "prompt\na lighthouse\n").unwrap();
        let (_server, cfg) = gateway().await;
        let generator = factory::build_generator(&cfg, "key".into()).unwrap();

        let args = BatchArgs {
            input: input.display().to_string(),
            output: Some(dir.path().join("out").display().to_string()),
            parallelism: None,
            model: Some("dall-e".into()),
        };
        let err = execute(args, &GlobalArgs::default(), &cfg, generator)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::UnsupportedDefaultModel { .. }));
        assert!(!dir.path().join("out").exists());
    }
}

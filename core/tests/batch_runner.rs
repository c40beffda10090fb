mod common;

use std::sync::Arc;

use common::{engine, write_file, Call, RecordingRenderer, Reply, ScriptedGenerator, PNG_BYTES};
use imggen_core::api::{
    BatchPlan, ErrorCode, ExecutionEngine, ExecutionOpts, GenerationMode, InputFileResolver,
    InputFormat, PromptSetParser, RawTaskRecord, RenderEvent, RunDefaults,
};
use pretty_assertions::assert_eq;

fn prompts(n: usize) -> Vec<RawTaskRecord> {
    (0..n)
        .map(|i| RawTaskRecord::with_prompt(format!("task-{i}")))
        .collect()
}

fn plan(records: Vec<RawTaskRecord>) -> BatchPlan {
    BatchPlan::from_records(records, &RunDefaults::default())
}

#[tokio::test]
async fn every_input_produces_exactly_one_result() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .on("task-2", 0, Reply::Fail("backend down"))
            .on("task-5", 0, Reply::TextOnly),
    );
    let engine = engine(generator, dir.path(), 3, &dir.path().join("out"));

    let summary = engine.execute_plan(plan(prompts(7))).await;

    assert_eq!(summary.total, 7);
    assert_eq!(summary.results.len(), 7);
    assert_eq!(summary.succeeded + summary.failed, 7);
    assert_eq!(summary.failed, 2);

    let mut indexes: Vec<_> = summary.results.iter().map(|r| r.index).collect();
    indexes.sort();
    assert_eq!(indexes, (0..7).collect::<Vec<_>>());
}

#[tokio::test]
async fn chunks_never_overlap() {
    let dir = tempfile::tempdir().unwrap();
    // Uneven delays so that a fast task in chunk 0 would be free to start
    // chunk 1 early if the runner were a dynamic pool.
    let generator = Arc::new(
        ScriptedGenerator::new()
            .on("task-0", 5, Reply::Bytes)
            .on("task-1", 60, Reply::Bytes)
            .on("task-2", 5, Reply::Bytes)
            .on("task-3", 30, Reply::Bytes)
            .on("task-4", 1, Reply::Bytes)
            .on("task-5", 10, Reply::Bytes)
            .on("task-6", 1, Reply::Bytes),
    );
    let limit = 3;
    let engine = engine(generator.clone(), dir.path(), limit as i64, &dir.path().join("out"));

    engine.execute_plan(plan(prompts(7))).await;

    let chunk_of = |prompt: &str| -> usize {
        prompt.trim_start_matches("task-").parse::<usize>().unwrap() / limit
    };
    let calls = generator.calls();
    assert_eq!(calls.len(), 14);

    for (pos, call) in calls.iter().enumerate() {
        if let Call::Start(prompt) = call {
            let chunk = chunk_of(prompt);
            // Every task of an earlier chunk has already ended.
            for earlier in 0..chunk * limit {
                let name = format!("task-{earlier}");
                let ended = calls[..pos]
                    .iter()
                    .any(|c| matches!(c, Call::End(p) if *p == name));
                assert!(ended, "{prompt} started before {name} ended");
            }
        }
    }
    assert_eq!(generator.max_in_flight(), limit);
}

#[tokio::test]
async fn parallelism_is_clamped() {
    let dir = tempfile::tempdir().unwrap();

    let generator = Arc::new(ScriptedGenerator::new().with_default_delay(10));
    let serial = engine(generator.clone(), dir.path(), 0, &dir.path().join("a"));
    assert_eq!(serial.opts().parallelism, 1);
    serial.execute_plan(plan(prompts(3))).await;
    assert_eq!(generator.max_in_flight(), 1);

    let generator = Arc::new(ScriptedGenerator::new().with_default_delay(30));
    let wide = engine(generator.clone(), dir.path(), 50, &dir.path().join("b"));
    assert_eq!(wide.opts().parallelism, 10);
    let summary = wide.execute_plan(plan(prompts(12))).await;
    assert_eq!(summary.succeeded, 12);
    assert_eq!(generator.max_in_flight(), 10);
}

#[tokio::test]
async fn results_arrive_in_completion_order() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .on("task-0", 80, Reply::Bytes)
            .on("task-1", 1, Reply::Bytes),
    );
    let engine = engine(generator, dir.path(), 2, &dir.path().join("out"));

    let summary = engine.execute_plan(plan(prompts(2))).await;

    let order: Vec<_> = summary.results.iter().map(|r| r.index).collect();
    assert_eq!(order, vec![1, 0]);
}

#[tokio::test]
async fn batch_filenames_cannot_leave_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    let absolute = elsewhere.path().join("escaped.png");
    let doc = serde_json::json!([
        {"prompt": "x", "filename": absolute.to_string_lossy()},
        {"prompt": "y", "filename": "../up.png"},
        {"prompt": "z", "filename": "/"},
    ])
    .to_string();
    let parsed = PromptSetParser::parse(&doc, InputFormat::Json).unwrap();

    let generator = Arc::new(ScriptedGenerator::new());
    let out = dir.path().join("out");
    let engine = engine(generator, dir.path(), 3, &out);
    let summary = engine
        .execute_plan(BatchPlan::from_records(parsed.records, &RunDefaults::default()))
        .await;

    assert!(!absolute.exists());
    assert!(!dir.path().join("up.png").exists());

    let pinned = summary.result_for(0).unwrap();
    assert!(pinned.success, "{:?}", pinned.error);
    let path = pinned.output_path.as_ref().unwrap();
    assert!(path.starts_with(&out), "{}", path.display());
    assert_eq!(std::fs::read(path).unwrap(), PNG_BYTES);

    let parent = summary.result_for(1).unwrap();
    assert_eq!(parent.output_path.as_deref(), Some(out.join("up.png").as_path()));
    assert_eq!(std::fs::read(out.join("up.png")).unwrap(), PNG_BYTES);

    let root_only = summary.result_for(2).unwrap();
    assert!(!root_only.success);
    assert_eq!(root_only.error_code, Some(ErrorCode::ValidationError));
}

#[tokio::test]
async fn json_scenario_with_blank_prompt_and_bogus_model() {
    let dir = tempfile::tempdir().unwrap();
    let doc = r#"[{"prompt":"a red circle","filename":"a.png"},{"prompt":"","filename":"b.png"},{"prompt":"a blue square","model":"bogus-model"}]"#;
    let parsed = PromptSetParser::parse(doc, InputFormat::Json).unwrap();
    assert_eq!(parsed.len(), 3);

    let generator = Arc::new(ScriptedGenerator::new());
    let out = dir.path().join("out");
    let engine = engine(generator.clone(), dir.path(), 2, &out);
    let summary = engine
        .execute_plan(BatchPlan::from_records(parsed.records, &RunDefaults::default()))
        .await;

    assert_eq!(summary.results.len(), 3);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 2);

    let ok = summary.result_for(0).unwrap();
    assert!(ok.success);
    assert_eq!(ok.output_filename, "a.png");
    assert_eq!(std::fs::read(out.join("a.png")).unwrap(), PNG_BYTES);

    let blank = summary.result_for(1).unwrap();
    assert!(!blank.success);
    assert_eq!(blank.output_filename, "b.png");
    assert_eq!(blank.error.as_deref(), Some("prompt required"));

    let bogus = summary.result_for(2).unwrap();
    assert!(!bogus.success);
    assert_eq!(bogus.output_filename, "image-3.png");
    assert_eq!(bogus.error_code, Some(ErrorCode::ModelNotFound));
    let msg = bogus.error.as_deref().unwrap();
    assert!(msg.contains("bogus-model"), "{msg}");
    assert!(msg.contains("gemini-3-pro, gemini-flash"), "{msg}");

    // Only the valid task reached the collaborator.
    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model_id, "google/gemini-2.5-flash-image");
    assert_eq!(requests[0].aspect_ratio.as_deref(), Some("1:1"));
    assert_eq!(requests[0].image_size.as_deref(), Some("2K"));
}

#[tokio::test]
async fn missing_reference_fails_only_that_task() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(ScriptedGenerator::new());
    let engine = engine(generator.clone(), dir.path(), 2, &dir.path().join("out"));

    let mut missing = RawTaskRecord::with_prompt("task-0");
    missing.reference_images = vec!["nowhere.png".into()];
    let summary = engine
        .execute_plan(plan(vec![missing, RawTaskRecord::with_prompt("task-1")]))
        .await;

    let failed = summary.result_for(0).unwrap();
    assert!(!failed.success);
    assert_eq!(failed.error_code, Some(ErrorCode::FileNotFound));
    let msg = failed.error.as_deref().unwrap();
    assert!(msg.starts_with("Reference image not found: nowhere.png"), "{msg}");
    for prefix in ["", "public/images", "public/uploads", "images", "assets", "input"] {
        let expected = dir.path().join(prefix).join("nowhere.png");
        assert!(msg.contains(&expected.display().to_string()), "{msg}");
    }

    assert!(summary.result_for(1).unwrap().success);
    assert_eq!(generator.requests().len(), 1);
}

#[tokio::test]
async fn references_are_sent_inline_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("assets/style.webp"), b"webp-bytes");
    write_file(&dir.path().join("product.jpg"), b"jpg-bytes");

    let generator = Arc::new(ScriptedGenerator::new());
    let engine = engine(generator.clone(), dir.path(), 1, &dir.path().join("out"));

    let mut record = RawTaskRecord::with_prompt("variation");
    record.style = Some("pop art".into());
    record.reference_images = vec!["product.jpg".into(), "style.webp".into()];
    let summary = engine.execute_plan(plan(vec![record])).await;
    assert!(summary.all_succeeded());

    let request = &generator.requests()[0];
    assert_eq!(request.mode(), GenerationMode::ImageAndText);
    assert_eq!(request.prompt, "variation, pop art style");
    let images: Vec<_> = request
        .images
        .iter()
        .map(|i| (i.media_type.as_str(), i.data.as_slice()))
        .collect();
    assert_eq!(
        images,
        vec![
            ("image/jpeg", b"jpg-bytes".as_slice()),
            ("image/webp", b"webp-bytes".as_slice()),
        ]
    );
}

#[tokio::test]
async fn collaborator_failures_are_per_task() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .on("task-0", 0, Reply::Fail("quota exceeded"))
            .on("task-1", 0, Reply::TextOnly)
            .on("task-2", 0, Reply::Panic)
            .on("task-3", 0, Reply::DataUrl),
    );
    let out = dir.path().join("out");
    let engine = engine(generator, dir.path(), 4, &out);

    let summary = engine.execute_plan(plan(prompts(5))).await;

    assert_eq!(summary.results.len(), 5);
    let error = |i: usize| summary.result_for(i).unwrap().error.clone();
    assert_eq!(error(0).as_deref(), Some("quota exceeded"));
    assert_eq!(error(1).as_deref(), Some("No image generated"));
    assert_eq!(
        summary.result_for(2).unwrap().error_code,
        Some(ErrorCode::GeneralError)
    );

    let data_url = summary.result_for(3).unwrap();
    assert!(data_url.success);
    assert_eq!(data_url.notes.as_deref(), Some("a small png"));
    assert_eq!(std::fs::read(out.join("image-4.png")).unwrap(), PNG_BYTES);

    assert!(summary.result_for(4).unwrap().success);
}

#[tokio::test]
async fn renderer_sees_live_progress_and_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Arc::new(RecordingRenderer::default());
    let engine = ExecutionEngine::builder(
        Arc::new(ScriptedGenerator::new()),
        ExecutionOpts::new(2, dir.path().join("out")),
    )
    .resolver(InputFileResolver::with_default_paths(dir.path()))
    .renderer(renderer.clone())
    .build();

    let mut records = prompts(3);
    records[1].resolution = Some("8K".into());
    let summary = engine.execute_plan(plan(records)).await;
    assert!(summary.all_succeeded());

    let events = renderer.events();
    assert!(matches!(
        events.first(),
        Some(RenderEvent::RunStart { total_tasks: 3, total_chunks: 2, parallelism: 2, .. })
    ));
    assert!(matches!(events.last(), Some(RenderEvent::RunEnd { .. })));

    let warnings: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::Warning { task_index, message, .. } => Some((*task_index, message.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        warnings,
        vec![(Some(1), "Unknown resolution \"8K\", using 2K".to_string())]
    );

    let completed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::TaskComplete { completed, total, .. } => Some((*completed, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![(1, 3), (2, 3), (3, 3)]);

    let chunk_events: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::ChunkStart { chunk_id, .. } => Some(format!("start-{chunk_id}")),
            RenderEvent::ChunkEnd { chunk_id, .. } => Some(format!("end-{chunk_id}")),
            _ => None,
        })
        .collect();
    assert_eq!(chunk_events, vec!["start-0", "end-0", "start-1", "end-1"]);
}

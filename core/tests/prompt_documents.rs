mod common;

use std::sync::Arc;

use common::{engine, ScriptedGenerator};
use imggen_core::api::{
    BatchPlan, Diagnostic, InputError, InputFormat, PlanEntry, PromptSetParser, Resolution,
    RunDefaults,
};
use pretty_assertions::assert_eq;

fn csv_plan(doc: &str) -> BatchPlan {
    let parsed = PromptSetParser::parse(doc, InputFormat::Csv).unwrap();
    let mut plan = BatchPlan::from_records(parsed.records, &RunDefaults::default());
    plan.prepend_diagnostics(parsed.diagnostics);
    plan
}

fn descriptors(plan: &BatchPlan) -> Vec<String> {
    plan.entries()
        .iter()
        .map(|e| match e {
            PlanEntry::Ready(t) => format!("{t:?}"),
            PlanEntry::Rejected(r) => format!("rejected {}: {}", r.index, r.error),
        })
        .collect()
}

#[test]
fn aspect_ratio_header_spellings_normalize_identically() {
    let body = "\"A lighthouse, at dusk\",lighthouse.png,landscape\n";
    let plans: Vec<_> = ["aspectratio", "aspect_ratio", "aspect-ratio"]
        .iter()
        .map(|h| csv_plan(&format!("prompt,filename,{h}\n{body}")))
        .collect();

    assert_eq!(descriptors(&plans[0]), descriptors(&plans[1]));
    assert_eq!(descriptors(&plans[0]), descriptors(&plans[2]));

    let PlanEntry::Ready(task) = &plans[0].entries()[0] else {
        panic!("expected a ready task");
    };
    assert_eq!(task.prompt, "A lighthouse, at dusk");
    assert_eq!(task.aspect_ratio, Some("16:9"));
}

#[test]
fn blank_prompt_rows_shrink_the_task_list() {
    let doc = "prompt,filename,referenceImages\n\
               one,1.png,\"img1.jpg|img2.png\"\n\
               ,2.png,\n\
               three,3.png,\"img1.jpg| |img2.png\"\n\
               \"\",4.png,\n";
    let plan = csv_plan(doc);

    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan.diagnostics(),
        &[
            Diagnostic::BlankPromptDropped { line: 3 },
            Diagnostic::BlankPromptDropped { line: 5 },
        ]
    );
    for entry in plan.entries() {
        let PlanEntry::Ready(task) = entry else {
            panic!("expected a ready task");
        };
        assert_eq!(task.reference_images, vec!["img1.jpg", "img2.png"]);
    }
}

#[tokio::test]
async fn unknown_resolution_warns_once_and_still_runs() {
    let dir = tempfile::tempdir().unwrap();
    let plan = csv_plan("prompt,resolution\nA fox,8K\n");

    let warnings: Vec<_> = plan.diagnostics().iter().map(|d| d.to_string()).collect();
    assert_eq!(warnings, vec!["Unknown resolution \"8K\", using 2K"]);
    let PlanEntry::Ready(task) = &plan.entries()[0] else {
        panic!("expected a ready task");
    };
    assert_eq!(task.resolution, Some(Resolution::TwoK));

    let generator = Arc::new(ScriptedGenerator::new());
    let summary = engine(generator, dir.path(), 3, &dir.path().join("out"))
        .execute_plan(plan)
        .await;
    assert!(summary.result_for(0).unwrap().success);
}

#[test]
fn structural_errors_reject_the_document() {
    assert!(matches!(
        PromptSetParser::parse("prompt\n", InputFormat::Csv),
        Err(InputError::CsvTooShort)
    ));
    assert!(matches!(
        PromptSetParser::parse("{\"prompt\":\"x\"}", InputFormat::Json),
        Err(InputError::NotAnArray)
    ));
    assert!(matches!(
        PromptSetParser::parse("not json", InputFormat::Json),
        Err(InputError::InvalidJson(_))
    ));
}

use chrono::Local;
use imggen_core::executor::traits::{OutputRendererPlugin, RenderEvent};
use serde_json::{json, Value};

pub struct JsonlRendererPlugin {
    pretty_print: bool,
}

impl JsonlRendererPlugin {
    pub fn new(pretty_print: bool) -> Self {
        Self { pretty_print }
    }

    fn event_to_json(&self, event: &RenderEvent) -> Value {
        let ts = Local::now().to_rfc3339();
        match event {
            RenderEvent::RunStart {
                run_id,
                total_tasks,
                total_chunks,
                parallelism,
                output_dir,
            } => json!({
                "v": 1,
                "event_type": "run.start",
                "ts": ts,
                "run_id": run_id,
                "metadata": {
                    "total_tasks": total_tasks,
                    "total_chunks": total_chunks,
                    "parallelism": parallelism,
                    "output_dir": output_dir,
                }
            }),
            RenderEvent::Warning {
                run_id,
                task_index,
                kind,
                message,
            } => json!({
                "v": 1,
                "event_type": "warning",
                "ts": ts,
                "run_id": run_id,
                "task_id": task_index,
                "metadata": {
                    "kind": kind,
                    "message": message,
                }
            }),
            RenderEvent::ChunkStart {
                run_id,
                chunk_id,
                task_indexes,
            } => json!({
                "v": 1,
                "event_type": "chunk.start",
                "ts": ts,
                "run_id": run_id,
                "metadata": {
                    "chunk_id": chunk_id,
                    "tasks": task_indexes,
                }
            }),
            RenderEvent::TaskComplete {
                run_id,
                completed,
                total,
                result,
            } => json!({
                "v": 1,
                "event_type": "task.end",
                "ts": ts,
                "run_id": run_id,
                "task_id": result.index,
                "code": result.error_code.map(|c| c.as_u16()).unwrap_or(0),
                "metadata": {
                    "success": result.success,
                    "output_filename": result.output_filename,
                    "output": result.output_path.as_ref().map(|p| p.display().to_string()),
                    "error": result.error,
                    "notes": result.notes,
                    "duration_ms": result.duration_ms,
                    "completed": completed,
                    "total": total,
                }
            }),
            RenderEvent::ChunkEnd { run_id, chunk_id } => json!({
                "v": 1,
                "event_type": "chunk.end",
                "ts": ts,
                "run_id": run_id,
                "metadata": {
                    "chunk_id": chunk_id,
                }
            }),
            RenderEvent::RunEnd { run_id, summary } => json!({
                "v": 1,
                "event_type": "run.end",
                "ts": ts,
                "run_id": run_id,
                "metadata": {
                    "total_tasks": summary.total,
                    "succeeded": summary.succeeded,
                    "failed": summary.failed,
                    "duration_ms": summary.duration_ms,
                }
            }),
        }
    }
}

impl OutputRendererPlugin for JsonlRendererPlugin {
    fn name(&self) -> &str {
        "jsonl-renderer"
    }

    fn format(&self) -> &str {
        "jsonl"
    }

    fn supports_streaming(&self) -> bool {
        true
    }

    fn render(&self, event: &RenderEvent) {
        let value = self.event_to_json(event);
        if self.pretty_print {
            println!("{}", serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".into()));
        } else {
            println!("{}", serde_json::to_string(&value).unwrap_or_else(|_| "{}".into()));
        }
    }
}

use imggen_core::executor::traits::{OutputRendererPlugin, RenderEvent};

const RULE_WIDTH: usize = 40;

pub struct TextRendererPlugin {
    ascii_only: bool,
}

impl TextRendererPlugin {
    pub fn new(ascii_only: bool) -> Self {
        Self { ascii_only }
    }

    fn marks(&self) -> (&'static str, &'static str, &'static str) {
        if self.ascii_only {
            ("OK", "FAIL", "-")
        } else {
            ("✓", "✗", "─")
        }
    }

    /// `None` for events that produce no line.
    fn format_event(&self, event: &RenderEvent) -> Option<String> {
        let (ok, fail, rule) = self.marks();
        match event {
            RenderEvent::RunStart {
                total_tasks,
                total_chunks,
                parallelism,
                output_dir,
                ..
            } => {
                let mut line = format!(
                    "Processing {} task(s) in {} chunk(s), parallelism {}",
                    total_tasks, total_chunks, parallelism
                );
                if !output_dir.is_empty() {
                    line.push_str(&format!("\nOutput: {}", output_dir));
                }
                Some(line)
            }
            RenderEvent::Warning { message, .. } => Some(format!("Warning: {}", message)),
            RenderEvent::ChunkStart {
                chunk_id,
                task_indexes,
                ..
            } => Some(format!(
                "Chunk {} ({} task(s))",
                chunk_id + 1,
                task_indexes.len()
            )),
            RenderEvent::TaskComplete {
                completed,
                total,
                result,
                ..
            } => {
                if result.success {
                    Some(format!(
                        "{} [{}/{}] {}",
                        ok, completed, total, result.output_filename
                    ))
                } else {
                    Some(format!(
                        "{} [{}/{}] {}: {}",
                        fail,
                        completed,
                        total,
                        result.output_filename,
                        result.error.as_deref().unwrap_or("unknown error")
                    ))
                }
            }
            RenderEvent::ChunkEnd { .. } => None,
            RenderEvent::RunEnd { summary, .. } => Some(format!(
                "{}\nComplete: {} succeeded, {} failed ({:.1}s)",
                rule.repeat(RULE_WIDTH),
                summary.succeeded,
                summary.failed,
                summary.duration_ms as f64 / 1000.0
            )),
        }
    }
}

impl OutputRendererPlugin for TextRendererPlugin {
    fn name(&self) -> &str {
        "text-renderer"
    }

    fn format(&self) -> &str {
        "text"
    }

    fn render(&self, event: &RenderEvent) {
        if let Some(line) = self.format_event(event) {
            println!("{}", line);
        }
    }
}

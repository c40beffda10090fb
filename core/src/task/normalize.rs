use crate::config::GenerationConfig;
use crate::error::{CliError, TaskError};

use super::catalog::{
    lookup_aspect_ratio, resolve_model, ModelKey, Resolution, DEFAULT_ASPECT_RATIO,
};
use super::diagnostic::Diagnostic;
use super::plan::{PlanEntry, RejectedTask};
use super::record::RawTaskRecord;

/// A validated unit of work, ready for the job runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Zero-based position in the input.
    pub index: usize,
    /// Final prompt text, style suffix included.
    pub prompt: String,
    pub output_filename: String,
    pub model: ModelKey,
    /// `None` lets the model pick.
    pub aspect_ratio: Option<&'static str>,
    /// `None` lets the model pick.
    pub resolution: Option<Resolution>,
    pub reference_images: Vec<String>,
}

/// Values applied to every task that leaves a field unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDefaults {
    pub model: ModelKey,
    pub aspect_ratio: Option<&'static str>,
    pub resolution: Option<Resolution>,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            model: ModelKey::default(),
            aspect_ratio: Some(DEFAULT_ASPECT_RATIO),
            resolution: Some(Resolution::default()),
        }
    }
}

impl RunDefaults {
    /// Builds run defaults from config, with an optional command-line model
    /// override. An unsupported default model is structural: nothing runs.
    pub fn from_config(
        cfg: &GenerationConfig,
        model_override: Option<&str>,
    ) -> Result<(Self, Vec<Diagnostic>), CliError> {
        let key = model_override.unwrap_or(&cfg.default_model);
        let model = ModelKey::parse(key).ok_or_else(|| CliError::UnsupportedDefaultModel {
            key: key.trim().to_string(),
            supported: ModelKey::supported_keys(),
        })?;

        let mut diagnostics = Vec::new();
        let aspect_ratio = resolve_aspect_ratio(&cfg.default_aspect_ratio, None, &mut diagnostics);
        let resolution = resolve_resolution(&cfg.default_resolution, None, &mut diagnostics);

        Ok((
            Self {
                model,
                aspect_ratio: Some(aspect_ratio),
                resolution: Some(resolution),
            },
            diagnostics,
        ))
    }

    /// Leaves aspect ratio and resolution to the model unless a task sets them.
    pub fn without_size_defaults(self) -> Self {
        Self {
            aspect_ratio: None,
            resolution: None,
            ..self
        }
    }
}

/// Validates one record. Rejections keep the output filename so the failure
/// can still be reported by name.
pub fn normalize(
    record: RawTaskRecord,
    index: usize,
    defaults: &RunDefaults,
    fallback_filename: String,
) -> (PlanEntry, Vec<Diagnostic>) {
    let output_filename = record.output_filename.clone().unwrap_or(fallback_filename);
    let reject = |error: TaskError| {
        (
            PlanEntry::Rejected(RejectedTask {
                index,
                output_filename: output_filename.clone(),
                error,
            }),
            Vec::new(),
        )
    };

    if !record.has_prompt() {
        return reject(TaskError::PromptRequired);
    }

    let model = match record.model.as_deref() {
        Some(key) => match resolve_model(key) {
            Ok(model) => model,
            Err(e) => return reject(e),
        },
        None => defaults.model,
    };

    let mut diagnostics = Vec::new();
    let aspect_ratio = match record.aspect_ratio.as_deref() {
        Some(raw) => Some(resolve_aspect_ratio(raw, Some(index), &mut diagnostics)),
        None => defaults.aspect_ratio,
    };
    let resolution = match record.resolution.as_deref() {
        Some(raw) => Some(resolve_resolution(raw, Some(index), &mut diagnostics)),
        None => defaults.resolution,
    };

    let prompt = match record.style.as_deref() {
        Some(style) => format!("{}, {} style", record.prompt.trim(), style),
        None => record.prompt.trim().to_string(),
    };

    let task = TaskDescriptor {
        index,
        prompt,
        output_filename,
        model,
        aspect_ratio,
        resolution,
        reference_images: record.reference_images,
    };
    (PlanEntry::Ready(task), diagnostics)
}

fn resolve_aspect_ratio(
    raw: &str,
    task: Option<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) -> &'static str {
    lookup_aspect_ratio(raw).unwrap_or_else(|| {
        diagnostics.push(Diagnostic::UnknownAspectRatio {
            task,
            value: raw.trim().to_string(),
            fallback: DEFAULT_ASPECT_RATIO,
        });
        DEFAULT_ASPECT_RATIO
    })
}

fn resolve_resolution(
    raw: &str,
    task: Option<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Resolution {
    Resolution::parse(raw).unwrap_or_else(|| {
        let fallback = Resolution::default();
        diagnostics.push(Diagnostic::UnknownResolution {
            task,
            value: raw.trim().to_ascii_uppercase(),
            fallback: fallback.as_str(),
        });
        fallback
    })
}

/// Edit commands tell the model how the attached images relate to the text.
pub fn edit_instruction(instruction: &str, image_count: usize) -> String {
    let instruction = instruction.trim();
    if image_count > 1 {
        format!(
            "{instruction}. Combine these {image_count} images creatively while following the instructions."
        )
    } else {
        format!("{instruction}. Edit or transform this image based on the instructions.")
    }
}

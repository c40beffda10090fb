/// One input record before validation. Both input formats reduce to this
/// shape: optional text fields are `None` when absent or blank, and reference
/// images are always an ordered (possibly empty) list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTaskRecord {
    pub prompt: String,
    pub output_filename: Option<String>,
    pub model: Option<String>,
    pub resolution: Option<String>,
    pub aspect_ratio: Option<String>,
    pub style: Option<String>,
    pub reference_images: Vec<String>,
}

impl RawTaskRecord {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn has_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }
}

/// Trimmed value, or `None` for blank input.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits a pipe-separated reference list, dropping blank segments.
pub fn split_references(value: &str) -> Vec<String> {
    value.split('|').filter_map(non_blank).collect()
}

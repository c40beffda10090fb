use std::fmt;

/// Non-fatal events raised while parsing or normalizing. Returned as values;
/// the caller decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownAspectRatio {
        task: Option<usize>,
        value: String,
        fallback: &'static str,
    },
    UnknownResolution {
        task: Option<usize>,
        value: String,
        fallback: &'static str,
    },
    BlankPromptDropped {
        line: usize,
    },
}

impl Diagnostic {
    /// Zero-based position of the task the warning belongs to, if any.
    pub fn task_index(&self) -> Option<usize> {
        match self {
            Self::UnknownAspectRatio { task, .. } | Self::UnknownResolution { task, .. } => *task,
            Self::BlankPromptDropped { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownAspectRatio { .. } => "unknown_aspect_ratio",
            Self::UnknownResolution { .. } => "unknown_resolution",
            Self::BlankPromptDropped { .. } => "blank_prompt_dropped",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAspectRatio { value, fallback, .. } => {
                write!(f, "Unknown aspect ratio \"{value}\", using square ({fallback})")
            }
            Self::UnknownResolution { value, fallback, .. } => {
                write!(f, "Unknown resolution \"{value}\", using {fallback}")
            }
            Self::BlankPromptDropped { line } => {
                write!(f, "Skipping CSV row at line {line}: empty prompt")
            }
        }
    }
}

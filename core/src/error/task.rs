use std::path::{Path, PathBuf};

use thiserror::Error;

/// Stable machine-readable codes for per-task failures (JSONL `code` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    ValidationError = 3,
    ModelNotFound = 21,
    BackendError = 20,
    NoImage = 24,
    EncodingError = 67,
    FileNotFound = 60,
    FileAccessDenied = 61,
    WriteFailed = 68,
    GeneralError = 1,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::ModelNotFound => "model_not_found",
            Self::BackendError => "backend_error",
            Self::NoImage => "no_image",
            Self::EncodingError => "encoding_error",
            Self::FileNotFound => "file_not_found",
            Self::FileAccessDenied => "file_access_denied",
            Self::WriteFailed => "write_failed",
            Self::GeneralError => "general_error",
        }
    }
}

/// A failure scoped to one task. Captured into that task's result; never
/// aborts sibling tasks.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("prompt required")]
    PromptRequired,

    #[error("Unsupported model \"{key}\". Supported models: {supported}")]
    UnsupportedModel { key: String, supported: String },

    #[error("Reference image not found: {reference}\nSearched in:\n  {}", join_paths(.searched))]
    ReferenceNotFound {
        reference: String,
        searched: Vec<PathBuf>,
    },

    #[error("failed to read reference image {path}: {source}")]
    ReferenceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No image generated")]
    NoImage,

    #[error("Image data format not recognized")]
    UnrecognizedImageData,

    #[error("image base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("{0}")]
    Collaborator(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid output filename \"{0}\"")]
    InvalidOutputName(String),

    #[error("task panicked: {0}")]
    Panicked(String),
}

impl TaskError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::PromptRequired => ErrorCode::ValidationError,
            Self::UnsupportedModel { .. } => ErrorCode::ModelNotFound,
            Self::ReferenceNotFound { .. } => ErrorCode::FileNotFound,
            Self::ReferenceRead { .. } => ErrorCode::FileAccessDenied,
            Self::NoImage => ErrorCode::NoImage,
            Self::UnrecognizedImageData => ErrorCode::EncodingError,
            Self::Decode(_) => ErrorCode::EncodingError,
            Self::Collaborator(_) => ErrorCode::BackendError,
            Self::Write { .. } => ErrorCode::WriteFailed,
            Self::InvalidOutputName(_) => ErrorCode::ValidationError,
            Self::Panicked(_) => ErrorCode::GeneralError,
        }
    }

    /// Collaborator errors keep the whole `anyhow` context chain so the
    /// reported message names the underlying cause.
    pub fn collaborator(err: anyhow::Error) -> Self {
        Self::Collaborator(format!("{err:#}"))
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| Path::display(p).to_string())
        .collect::<Vec<_>>()
        .join("\n  ")
}

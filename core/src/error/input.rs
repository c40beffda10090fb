use thiserror::Error;

/// Errors that reject a whole prompt document. None of these are recoverable
/// per task; the batch never starts.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("unsupported input format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("top-level JSON value must be an array of prompt objects")]
    NotAnArray,

    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("CSV must have a header row and at least one data row")]
    CsvTooShort,
}

use thiserror::Error;

use super::input::InputError;

/// Structural failures: anything that stops a command before (or instead of)
/// running its tasks.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("{var} environment variable is required")]
    MissingCredential { var: String },

    #[error("Unsupported default model \"{key}\". Supported models: {supported}")]
    UnsupportedDefaultModel { key: String, supported: String },

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Error parsing input file: {0}")]
    Input(#[from] InputError),

    #[error("Input file must contain an array of prompts")]
    EmptyBatch,

    #[error("{0}")]
    TaskFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Every structural failure terminates the process with exit code 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

//! Prompt document parsing.
//!
//! A batch document is either a JSON array of task objects or a CSV table.
//! The format is chosen from the file extension; anything else is rejected
//! before the file is read.

use std::path::Path;

use crate::error::{CliError, InputError};
use crate::task::{Diagnostic, RawTaskRecord};

use super::csv::parse_csv;
use super::json::parse_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(InputError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Records in document order plus warnings raised while parsing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedPromptSet {
    pub records: Vec<RawTaskRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedPromptSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct PromptSetParser;

impl PromptSetParser {
    /// Parses document text in the given format. Structural problems fail the
    /// whole document.
    pub fn parse(content: &str, format: InputFormat) -> Result<ParsedPromptSet, InputError> {
        match format {
            InputFormat::Json => parse_json(content),
            InputFormat::Csv => parse_csv(content),
        }
    }

    /// Reads and parses a prompt document from disk.
    pub async fn load(path: &Path) -> Result<ParsedPromptSet, CliError> {
        let format = InputFormat::from_path(path)?;
        if !path.is_file() {
            return Err(CliError::InputNotFound(path.display().to_string()));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let parsed = Self::parse(&content, format)?;
        tracing::debug!(
            path = %path.display(),
            format = format.as_str(),
            records = parsed.len(),
            dropped = parsed.diagnostics.len(),
            "prompt document parsed"
        );
        Ok(parsed)
    }
}

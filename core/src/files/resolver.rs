use std::path::{Path, PathBuf};

use crate::config::default_search_paths;
use crate::error::TaskError;

use super::media::content_type_for;

/// Outcome of probing the candidate directories for one reference.
///
/// `searched_paths` is filled whether or not the file was found so that a
/// "not found" report can name every location that was tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub reference: String,
    pub found_path: Option<PathBuf>,
    pub searched_paths: Vec<PathBuf>,
    pub content_type: &'static str,
}

/// A reference that resolved to an existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundReference {
    pub path: PathBuf,
    pub content_type: &'static str,
}

impl ResolvedReference {
    pub fn is_found(&self) -> bool {
        self.found_path.is_some()
    }

    pub fn require(self) -> Result<FoundReference, TaskError> {
        match self.found_path {
            Some(path) => Ok(FoundReference {
                path,
                content_type: self.content_type,
            }),
            None => Err(TaskError::ReferenceNotFound {
                reference: self.reference,
                searched: self.searched_paths,
            }),
        }
    }
}

/// Locates reference files by probing an ordered list of candidate
/// directories. Holds no state beyond its search configuration; only
/// existence checks touch the filesystem.
#[derive(Debug, Clone)]
pub struct InputFileResolver {
    base_dir: PathBuf,
    prefixes: Vec<String>,
}

impl InputFileResolver {
    pub fn new(base_dir: impl Into<PathBuf>, prefixes: Vec<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            prefixes,
        }
    }

    /// Resolver rooted at the process working directory.
    pub fn from_current_dir(prefixes: Vec<String>) -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?, prefixes))
    }

    pub fn with_default_paths(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(base_dir, default_search_paths())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Candidate paths in probe order. Absolute references have exactly one.
    pub fn candidates(&self, reference: &str) -> Vec<PathBuf> {
        let reference_path = Path::new(reference);
        if reference_path.is_absolute() {
            return vec![reference_path.to_path_buf()];
        }

        self.prefixes
            .iter()
            .map(|prefix| {
                let prefix = prefix.trim();
                if prefix.is_empty() {
                    self.base_dir.join(reference_path)
                } else {
                    self.base_dir.join(prefix).join(reference_path)
                }
            })
            .collect()
    }

    pub fn resolve(&self, reference: &str) -> ResolvedReference {
        let mut searched_paths = Vec::new();
        let mut found_path = None;

        for candidate in self.candidates(reference) {
            let hit = candidate.is_file();
            searched_paths.push(candidate);
            if hit {
                found_path = searched_paths.last().cloned();
                break;
            }
        }

        let content_type = match &found_path {
            Some(path) => content_type_for(path),
            None => content_type_for(Path::new(reference)),
        };

        tracing::debug!(
            reference = %reference,
            found = found_path.is_some(),
            probes = searched_paths.len(),
            "reference resolved"
        );

        ResolvedReference {
            reference: reference.to_string(),
            found_path,
            searched_paths,
            content_type,
        }
    }
}

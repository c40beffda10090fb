use crate::error::TaskError;

use super::diagnostic::Diagnostic;
use super::naming::numbered_filename;
use super::normalize::{normalize, RunDefaults, TaskDescriptor};
use super::record::RawTaskRecord;

/// A task that failed validation. It still takes its slot in the run and
/// produces a failed result.
#[derive(Debug)]
pub struct RejectedTask {
    pub index: usize,
    pub output_filename: String,
    pub error: TaskError,
}

#[derive(Debug)]
pub enum PlanEntry {
    Ready(TaskDescriptor),
    Rejected(RejectedTask),
}

impl PlanEntry {
    pub fn index(&self) -> usize {
        match self {
            Self::Ready(t) => t.index,
            Self::Rejected(r) => r.index,
        }
    }

    pub fn output_filename(&self) -> &str {
        match self {
            Self::Ready(t) => &t.output_filename,
            Self::Rejected(r) => &r.output_filename,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Ordered entries for one run plus every warning raised while building it.
#[derive(Debug, Default)]
pub struct BatchPlan {
    entries: Vec<PlanEntry>,
    diagnostics: Vec<Diagnostic>,
}

impl BatchPlan {
    /// Normalizes batch records; unnamed tasks become `image-<n+1>.png`.
    pub fn from_records(records: Vec<RawTaskRecord>, defaults: &RunDefaults) -> Self {
        let mut plan = Self::default();
        for (index, record) in records.into_iter().enumerate() {
            let (entry, diagnostics) =
                normalize(record, index, defaults, numbered_filename(index));
            plan.push(entry, diagnostics);
        }
        plan
    }

    pub fn push(&mut self, entry: PlanEntry, diagnostics: Vec<Diagnostic>) {
        self.entries.push(entry);
        self.diagnostics.extend(diagnostics);
    }

    /// Warnings raised before the run starts (e.g. from parsing).
    pub fn prepend_diagnostics(&mut self, mut diagnostics: Vec<Diagnostic>) {
        diagnostics.append(&mut self.diagnostics);
        self.diagnostics = diagnostics;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn ready_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_ready()).count()
    }

    pub fn into_parts(self) -> (Vec<PlanEntry>, Vec<Diagnostic>) {
        (self.entries, self.diagnostics)
    }
}

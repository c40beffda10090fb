use crate::task::PlanEntry;

/// Common task interface for the chunk scheduler. The scheduler only needs
/// enough identity to report a task that never produced a result.
pub trait TaskLike: Send + 'static {
    fn index(&self) -> usize;
    fn output_filename(&self) -> &str;
}

impl TaskLike for PlanEntry {
    fn index(&self) -> usize {
        PlanEntry::index(self)
    }

    fn output_filename(&self) -> &str {
        PlanEntry::output_filename(self)
    }
}

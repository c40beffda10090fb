//! Task model: raw records, the closed parameter catalogs, and the
//! normalizer that turns records into a runnable `BatchPlan`.

mod catalog;
mod diagnostic;
mod naming;
mod normalize;
mod plan;
mod record;

pub use catalog::{
    lookup_aspect_ratio, resolve_model, ModelKey, Resolution, DEFAULT_ASPECT_KEY,
    DEFAULT_ASPECT_RATIO,
};
pub use diagnostic::Diagnostic;
pub use naming::{
    default_batch_dir, default_edit_output, default_generate_output, numbered_filename,
    timestamp_tag,
};
pub use normalize::{edit_instruction, normalize, RunDefaults, TaskDescriptor};
pub use plan::{BatchPlan, PlanEntry, RejectedTask};
pub use record::{non_blank, split_references, RawTaskRecord};

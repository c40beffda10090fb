use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Default name of the n-th (zero-based) batch output.
pub fn numbered_filename(index: usize) -> String {
    format!("image-{}.png", index + 1)
}

/// `YYYYMMDDHHMMSS` in UTC.
pub fn timestamp_tag(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

pub fn default_generate_output(root: &Path, now: DateTime<Utc>) -> PathBuf {
    root.join(format!("generated-{}.png", timestamp_tag(now)))
}

pub fn default_edit_output(root: &Path, now: DateTime<Utc>) -> PathBuf {
    root.join(format!("edited-{}.png", timestamp_tag(now)))
}

pub fn default_batch_dir(root: &Path, now: DateTime<Utc>) -> PathBuf {
    root.join(format!("batch-{}", timestamp_tag(now)))
}

use std::path::{Component, Path, PathBuf};

use crate::error::TaskError;

/// Where a task's output lands. With an empty `dir` (single-shot commands)
/// the name is used as given. Otherwise only the normal components of the
/// name are kept, so roots, drive prefixes and `..` can never leave `dir`.
pub fn output_path_in(dir: &Path, name: &str) -> Result<PathBuf, TaskError> {
    if dir.as_os_str().is_empty() {
        return Ok(PathBuf::from(name));
    }

    let relative: PathBuf = Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    if relative.as_os_str().is_empty() {
        return Err(TaskError::InvalidOutputName(name.to_string()));
    }
    Ok(dir.join(relative))
}

/// Persists `bytes` at `path`, creating missing parent directories and
/// replacing any existing file.
///
/// Bytes land in a hidden sibling temp file first and are renamed into
/// place, so an interrupted run never leaves a truncated file at `path`.
pub async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), TaskError> {
    let write_err = |source: std::io::Error| TaskError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp = temp_sibling(path);
    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "output written");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let tmp_name = format!(".{}.{}.tmp", name, uuid::Uuid::new_v4().simple());
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

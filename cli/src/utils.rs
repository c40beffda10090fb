use std::path::{Path, PathBuf};

use imggen_core::api::CliError;

/// Reads a dotenv-style file. Unreadable files are a config error.
pub fn parse_env_file(path: &Path) -> Result<Vec<(String, String)>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("failed to read env file {}: {}", path.display(), e))
    })?;
    Ok(parse_env_content(&content))
}

/// Lenient dotenv parsing: blank lines, `#` comments and lines without `=`
/// are skipped; an `export ` prefix is accepted.
pub fn parse_env_content(content: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };
        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        out.push((key.to_string(), parse_env_value(v.trim())));
    }

    out
}

fn parse_env_value(value: &str) -> String {
    if value.len() >= 2 {
        if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            return unescape_env_value(inner);
        }
        if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            return inner.to_string();
        }
    }
    // Unquoted values may carry a trailing comment.
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end().to_string(),
        None => value.to_string(),
    }
}

fn unescape_env_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Expands a leading `~` in user-supplied paths.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Name of the per-project config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "imggen.toml";

/// Get the default data directory: ~/.imggen
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".imggen"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.imggen/config.toml
    let user_config = get_data_dir().ok().map(|d| d.join("config.toml"));

    // Priority 2: ./imggen.toml
    let local_config = Path::new(LOCAL_CONFIG_FILE);

    let mut cfg = match user_config.filter(|p| p.exists()) {
        Some(path) => load_from_path(&path)?,
        None if local_config.exists() => load_from_path(local_config)?,
        None => AppConfig::default(),
    };

    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        if let Ok(dir) = get_data_dir() {
            cfg.logging.directory = Some(dir.join("logs").to_string_lossy().to_string());
        }
    }

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", path.display(), e))?;
    Ok(cfg)
}

/// Environment variable overrides (highest priority). Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank("IMGGEN_GATEWAY_URL") {
        cfg.gateway.base_url = v;
    }
    if let Some(v) = non_blank("IMGGEN_DEFAULT_MODEL") {
        cfg.generation.default_model = v;
    }
    if let Some(v) = non_blank("IMGGEN_LOG_LEVEL") {
        cfg.logging.level = v;
    }
}

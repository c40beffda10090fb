use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or ~/.imggen/logs if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "imggen_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Run-wide defaults applied to every task that leaves a field unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default = "default_resolution")]
    pub default_resolution: String,

    #[serde(default = "default_aspect_ratio")]
    pub default_aspect_ratio: String,
}

fn default_model() -> String {
    "gemini-flash".to_string()
}

fn default_resolution() -> String {
    "2K".to_string()
}

fn default_aspect_ratio() -> String {
    "square".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            default_resolution: default_resolution(),
            default_aspect_ratio: default_aspect_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_parallelism")]
    pub parallelism: i64,

    /// Directory under which timestamped outputs are placed when no explicit
    /// output path is given.
    #[serde(default = "default_output_root")]
    pub output_root: String,
}

fn default_parallelism() -> i64 {
    3
}

fn default_output_root() -> String {
    "public/images".to_string()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            output_root: default_output_root(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_gateway_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_gateway_url() -> String {
    "https://ai-gateway.vercel.sh/v1".to_string()
}

fn default_api_key_env() -> String {
    "AI_GATEWAY_API_KEY".to_string()
}

fn default_gateway_timeout_ms() -> u64 {
    300_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_gateway_timeout_ms(),
        }
    }
}

/// Candidate directories probed, in order, for relative reference images.
/// The empty prefix is the working directory itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_paths")]
    pub paths: Vec<String>,
}

pub fn default_search_paths() -> Vec<String> {
    [
        "",
        "public/images/",
        "public/uploads/",
        "images/",
        "assets/",
        "input/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            paths: default_search_paths(),
        }
    }
}

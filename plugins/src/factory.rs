use std::sync::Arc;

use anyhow::Result;

use imggen_core::api::{AppConfig, ImageGenerator, OutputRendererPlugin};

use crate::backend::GatewayImageGenerator;
use crate::executor::{JsonlRendererPlugin, TextRendererPlugin};

pub fn build_generator(cfg: &AppConfig, api_key: String) -> Result<Arc<dyn ImageGenerator>> {
    Ok(Arc::new(GatewayImageGenerator::new(
        cfg.gateway.base_url.clone(),
        api_key,
        cfg.gateway.timeout_ms,
    )?))
}

pub fn build_renderer(stream_format: &str, ascii_only: bool) -> Arc<dyn OutputRendererPlugin> {
    match stream_format {
        "jsonl" => Arc::new(JsonlRendererPlugin::new(false)),
        // Anything other than jsonl renders as text.
        _ => Arc::new(TextRendererPlugin::new(ascii_only)),
    }
}

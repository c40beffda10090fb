//! Shared fixtures for command tests.
use imggen_core::api::AppConfig;
use mockito::{Matcher, Server, ServerGuard};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const IMAGE_REPLY: &str = r#"{"choices":[{"message":{"content":"","images":[{"type":"image_url","image_url":{"url":"data:image/png;base64,iVBORw0KGgo="}}]}}]}"#;

/// A gateway that draws for prompts mentioning "lighthouse" and answers
/// prompts mentioning "volcano" with a 500. Config points at it.
pub async fn gateway() -> (ServerGuard, AppConfig) {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("lighthouse".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(IMAGE_REPLY)
        .create_async()
        .await;
    server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("volcano".into()))
        .with_status(500)
        .with_body(r#"{"error":"upstream exploded"}"#)
        .create_async()
        .await;

    let mut cfg = AppConfig::default();
    cfg.gateway.base_url = server.url();
    cfg.gateway.timeout_ms = 5_000;
    (server, cfg)
}

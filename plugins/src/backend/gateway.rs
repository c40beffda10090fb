use anyhow::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use imggen_core::api::{
    ArtifactData, GeneratedFile, GenerationRequest, GenerationResponse, ImageGenerator,
};
use serde_json::{json, Map, Value};

use super::http::{parse_json_response, GatewayHttpError};

const FALLBACK_IMAGE_TYPE: &str = "image/png";

/// Image generator backed by an OpenAI-compatible chat completions gateway.
#[derive(Clone)]
pub struct GatewayImageGenerator {
    api_key: String,
    http: reqwest::Client,
    url_completions: String,
}

impl GatewayImageGenerator {
    pub fn new(base_url: String, api_key: String, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            api_key,
            http,
            url_completions: format!("{}/chat/completions", normalized),
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }
}

#[async_trait]
impl ImageGenerator for GatewayImageGenerator {
    fn name(&self) -> &str {
        "gateway"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let url = &self.url_completions;
        tracing::debug!(
            target: "imggen.gateway",
            stage = "gateway.generate.in",
            url = %url,
            model = %request.model_id,
            mode = request.mode().as_str(),
            images = request.images.len()
        );
        let payload = request_body(&request);
        let req = self.http.post(url).json(&payload);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| GatewayHttpError::from_reqwest(err, url.clone()))?;
        let status = resp.status();
        let value = parse_json_response(resp).await?;
        let response = parse_response(&value);
        tracing::debug!(
            target: "imggen.gateway",
            stage = "gateway.generate.out",
            status = %status,
            files = response.files.len(),
            has_text = response.text.is_some()
        );
        Ok(response)
    }
}

/// Chat completion payload. Reference images come before the prompt text;
/// without references the content is the bare prompt string.
pub(crate) fn request_body(request: &GenerationRequest) -> Value {
    let content = if request.images.is_empty() {
        Value::String(request.prompt.clone())
    } else {
        let mut parts: Vec<Value> = request
            .images
            .iter()
            .map(|img| {
                json!({
                    "type": "image_url",
                    "image_url": {
                        "url": format!("data:{};base64,{}", img.media_type, STANDARD.encode(&img.data)),
                    }
                })
            })
            .collect();
        parts.push(json!({ "type": "text", "text": request.prompt }));
        Value::Array(parts)
    };

    let mut google = Map::new();
    google.insert("responseModalities".into(), json!(["IMAGE"]));
    let mut image_config = Map::new();
    if let Some(ratio) = &request.aspect_ratio {
        image_config.insert("aspectRatio".into(), json!(ratio));
    }
    if let Some(size) = &request.image_size {
        image_config.insert("imageSize".into(), json!(size));
    }
    if !image_config.is_empty() {
        google.insert("imageConfig".into(), Value::Object(image_config));
    }

    json!({
        "model": request.model_id,
        "messages": [{ "role": "user", "content": content }],
        "modalities": ["image"],
        "providerOptions": { "google": google },
    })
}

/// Collects images from `choices[].message.images[]` and from a top-level
/// `files[]` array, plus any text content of the first choice.
pub(crate) fn parse_response(value: &Value) -> GenerationResponse {
    let mut files = Vec::new();

    let choices = value
        .get("choices")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for choice in choices {
        let images = choice
            .pointer("/message/images")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for image in images {
            let url = image
                .pointer("/image_url/url")
                .or_else(|| image.get("url"))
                .and_then(Value::as_str);
            files.push(file_from_url(url));
        }
    }

    if let Some(extra) = value.get("files").and_then(Value::as_array) {
        for file in extra {
            let media_type = file
                .get("mediaType")
                .or_else(|| file.get("media_type"))
                .and_then(Value::as_str)
                .map(str::to_string);
            let data = file
                .get("base64")
                .or_else(|| file.get("data"))
                .and_then(Value::as_str)
                .map(|s| ArtifactData::Base64(s.to_string()))
                .unwrap_or(ArtifactData::Missing);
            files.push(GeneratedFile { media_type, data });
        }
    }

    let text = choices
        .first()
        .and_then(|c| c.pointer("/message/content"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    GenerationResponse { files, text }
}

fn file_from_url(url: Option<&str>) -> GeneratedFile {
    match url {
        Some(url) if url.starts_with("data:") => {
            let media_type = url
                .trim_start_matches("data:")
                .split([';', ','])
                .next()
                .filter(|m| !m.is_empty())
                .unwrap_or(FALLBACK_IMAGE_TYPE);
            GeneratedFile {
                media_type: Some(media_type.to_string()),
                data: ArtifactData::Base64(url.to_string()),
            }
        }
        // Remote URLs are not fetched.
        _ => GeneratedFile {
            media_type: Some(FALLBACK_IMAGE_TYPE.to_string()),
            data: ArtifactData::Missing,
        },
    }
}

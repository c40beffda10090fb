#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use imggen_core::api::{
    ArtifactData, ExecutionEngine, ExecutionOpts, GeneratedFile, GenerationRequest,
    GenerationResponse, ImageGenerator, InputFileResolver, OutputRendererPlugin, RenderEvent,
};

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3];

pub fn png_base64() -> String {
    STANDARD.encode(PNG_BYTES)
}

/// What the scripted generator answers for one prompt.
#[derive(Debug, Clone)]
pub enum Reply {
    Bytes,
    DataUrl,
    TextOnly,
    Fail(&'static str),
    Panic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Start(String),
    End(String),
}

/// In-memory `ImageGenerator` that answers per prompt and records how many
/// calls were in flight at once.
pub struct ScriptedGenerator {
    replies: HashMap<String, (u64, Reply)>,
    default_delay_ms: u64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<Call>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            default_delay_ms: 0,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default_delay(mut self, ms: u64) -> Self {
        self.default_delay_ms = ms;
        self
    }

    pub fn on(mut self, prompt: &str, delay_ms: u64, reply: Reply) -> Self {
        self.replies.insert(prompt.to_string(), (delay_ms, reply));
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<GenerationResponse> {
        let prompt = request.prompt.clone();
        self.requests.lock().unwrap().push(request);
        self.calls.lock().unwrap().push(Call::Start(prompt.clone()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (delay_ms, reply) = self
            .replies
            .get(&prompt)
            .cloned()
            .unwrap_or((self.default_delay_ms, Reply::Bytes));
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(Call::End(prompt));

        let image = |data| GeneratedFile {
            media_type: Some("image/png".to_string()),
            data,
        };
        match reply {
            Reply::Bytes => Ok(GenerationResponse {
                files: vec![image(ArtifactData::Bytes(PNG_BYTES.to_vec()))],
                text: None,
            }),
            Reply::DataUrl => Ok(GenerationResponse {
                files: vec![image(ArtifactData::Base64(format!(
                    "data:image/png;base64,{}",
                    png_base64()
                )))],
                text: Some("a small png".to_string()),
            }),
            Reply::TextOnly => Ok(GenerationResponse {
                files: Vec::new(),
                text: Some("I cannot draw that".to_string()),
            }),
            Reply::Fail(msg) => Err(anyhow::anyhow!(msg)),
            Reply::Panic => panic!("generator exploded"),
        }
    }
}

/// Renderer that keeps every event it is given.
#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl OutputRendererPlugin for RecordingRenderer {
    fn name(&self) -> &str {
        "recording"
    }

    fn format(&self) -> &str {
        "test"
    }

    fn render(&self, event: &RenderEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn engine(
    generator: Arc<ScriptedGenerator>,
    base_dir: &Path,
    parallelism: i64,
    output_dir: &Path,
) -> ExecutionEngine {
    ExecutionEngine::builder(generator, ExecutionOpts::new(parallelism, output_dir))
        .resolver(InputFileResolver::with_default_paths(base_dir))
        .build()
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

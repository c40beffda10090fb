/// Reference image sent inline with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Which collaborator mode a request uses. Decided solely by whether any
/// reference images are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    TextToImage,
    ImageAndText,
}

impl GenerationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextToImage => "text-to-image",
            Self::ImageAndText => "image+text",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Provider model identifier, e.g. `google/gemini-2.5-flash-image`.
    pub model_id: String,
    pub prompt: String,
    /// Reference images in the order given by the task; sent before the prompt.
    pub images: Vec<InlineImage>,
    /// Canonical ratio string (`16:9`). `None` lets the model decide.
    pub aspect_ratio: Option<String>,
    /// Resolution tier (`1K`/`2K`/`4K`). `None` lets the model decide.
    pub image_size: Option<String>,
}

impl GenerationRequest {
    pub fn mode(&self) -> GenerationMode {
        if self.images.is_empty() {
            GenerationMode::TextToImage
        } else {
            GenerationMode::ImageAndText
        }
    }
}

/// Payload of a returned file. Collaborators hand back either raw bytes or a
/// base64 string (optionally a full data URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactData {
    Bytes(Vec<u8>),
    Base64(String),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub media_type: Option<String>,
    pub data: ArtifactData,
}

impl GeneratedFile {
    pub fn is_image(&self) -> bool {
        self.media_type
            .as_deref()
            .map(|m| m.starts_with("image/"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationResponse {
    pub files: Vec<GeneratedFile>,
    /// Free-form text the model returned alongside the image.
    pub text: Option<String>,
}

impl GenerationResponse {
    pub fn first_image(&self) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.is_image())
    }
}

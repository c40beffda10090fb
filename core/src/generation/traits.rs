use async_trait::async_trait;

use super::types::{GenerationRequest, GenerationResponse};

/// The external image-generation service. Treated as a black box: it either
/// fails or returns zero or more files.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<GenerationResponse>;
}

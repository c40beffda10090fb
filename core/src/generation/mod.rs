//! Collaborator seam: request/response shapes and the `ImageGenerator` trait
//! implemented by concrete backends in `imggen-plugins`.

mod traits;
mod types;

pub use traits::ImageGenerator;
pub use types::{
    ArtifactData, GeneratedFile, GenerationMode, GenerationRequest, GenerationResponse,
    InlineImage,
};

//! Filesystem side of a task: locating reference images, decoding returned
//! artifacts and persisting the output.

mod artifact;
mod media;
mod resolver;
mod writer;

pub use artifact::{decode_artifact, strip_data_url};
pub use media::{content_type_for, DEFAULT_CONTENT_TYPE};
pub use resolver::{FoundReference, InputFileResolver, ResolvedReference};
pub use writer::{output_path_in, write_output};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::TaskError;
use crate::generation::{ArtifactData, GeneratedFile};

lazy_static! {
    static ref DATA_URL_PREFIX: Regex = Regex::new(r"^data:image/\w+;base64,").unwrap();
}

/// Removes a leading `data:image/<type>;base64,` header if present.
pub fn strip_data_url(encoded: &str) -> &str {
    match DATA_URL_PREFIX.find(encoded) {
        Some(m) => &encoded[m.end()..],
        None => encoded,
    }
}

/// Raw bytes of a returned image file.
pub fn decode_artifact(file: &GeneratedFile) -> Result<Vec<u8>, TaskError> {
    match &file.data {
        ArtifactData::Bytes(bytes) => Ok(bytes.clone()),
        ArtifactData::Base64(encoded) => {
            let payload: String = strip_data_url(encoded.trim())
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            Ok(BASE64_STANDARD.decode(payload.as_bytes())?)
        }
        ArtifactData::Missing => Err(TaskError::UnrecognizedImageData),
    }
}

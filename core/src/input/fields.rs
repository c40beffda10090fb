use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::task::{non_blank, split_references, RawTaskRecord};

/// Canonical record field. CSV headers and JSON keys both map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Prompt,
    OutputFilename,
    Model,
    Resolution,
    AspectRatio,
    Style,
    ReferenceImages,
}

lazy_static! {
    static ref FIELD_NAMES: HashMap<&'static str, RecordField> = {
        let table: &[(&[&str], RecordField)] = &[
            (&["prompt"], RecordField::Prompt),
            (
                &["filename", "outputfilename", "output_filename", "output-filename", "output"],
                RecordField::OutputFilename,
            ),
            (&["model", "modelkey", "model_key", "model-key"], RecordField::Model),
            (&["resolution"], RecordField::Resolution),
            (&["aspectratio", "aspect_ratio", "aspect-ratio"], RecordField::AspectRatio),
            (&["style"], RecordField::Style),
            (
                &["referenceimages", "reference_images", "reference-images", "references"],
                RecordField::ReferenceImages,
            ),
        ];
        table
            .iter()
            .flat_map(|(names, field)| names.iter().map(move |n| (*n, *field)))
            .collect()
    };
}

/// Canonical field for a header or key, case-insensitive. Unknown names are
/// ignored by both parsers.
pub fn field_for(name: &str) -> Option<RecordField> {
    FIELD_NAMES.get(name.trim().to_ascii_lowercase().as_str()).copied()
}

/// Stores a text value on the record. Blank optional values stay absent.
pub fn apply_text(record: &mut RawTaskRecord, field: RecordField, value: &str) {
    match field {
        RecordField::Prompt => record.prompt = value.trim().to_string(),
        RecordField::OutputFilename => record.output_filename = non_blank(value),
        RecordField::Model => record.model = non_blank(value),
        RecordField::Resolution => record.resolution = non_blank(value),
        RecordField::AspectRatio => record.aspect_ratio = non_blank(value),
        RecordField::Style => record.style = non_blank(value),
        RecordField::ReferenceImages => record.reference_images = split_references(value),
    }
}

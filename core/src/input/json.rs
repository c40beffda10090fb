use serde_json::Value;

use crate::error::InputError;
use crate::task::{non_blank, RawTaskRecord};

use super::fields::{apply_text, field_for, RecordField};
use super::parser::ParsedPromptSet;

/// Parses a JSON array of task objects. Records are kept as-is; blank
/// prompts are left for the normalizer to reject per task.
pub fn parse_json(content: &str) -> Result<ParsedPromptSet, InputError> {
    let doc: Value = serde_json::from_str(content)?;
    let Value::Array(items) = doc else {
        return Err(InputError::NotAnArray);
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| record_from_value(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedPromptSet {
        records,
        diagnostics: Vec::new(),
    })
}

fn record_from_value(index: usize, item: &Value) -> Result<RawTaskRecord, InputError> {
    let Value::Object(map) = item else {
        return Err(InputError::InvalidRecord {
            index,
            reason: "expected an object".to_string(),
        });
    };

    let mut record = RawTaskRecord::default();
    for (key, value) in map {
        let Some(field) = field_for(key) else {
            continue;
        };
        let invalid = |expected: &str| InputError::InvalidRecord {
            index,
            reason: format!("field \"{key}\" must be {expected}"),
        };

        match (field, value) {
            (_, Value::Null) => {}
            (_, Value::String(s)) => apply_text(&mut record, field, s),
            (_, Value::Number(n)) => apply_text(&mut record, field, &n.to_string()),
            (_, Value::Bool(b)) => apply_text(&mut record, field, &b.to_string()),
            (RecordField::ReferenceImages, Value::Array(refs)) => {
                record.reference_images = refs
                    .iter()
                    .map(|r| r.as_str().ok_or_else(|| invalid("an array of strings")))
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .filter_map(non_blank)
                    .collect();
            }
            (RecordField::ReferenceImages, _) => {
                return Err(invalid("a string or an array of strings"))
            }
            _ => return Err(invalid("a string")),
        }
    }

    Ok(record)
}

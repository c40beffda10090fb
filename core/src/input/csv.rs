use crate::error::InputError;
use crate::task::{Diagnostic, RawTaskRecord};

use super::fields::{apply_text, field_for};
use super::parser::ParsedPromptSet;

/// Parses a header-plus-rows CSV document. Records are line-based; rows with
/// an empty prompt are dropped and reported as diagnostics.
pub fn parse_csv(content: &str) -> Result<ParsedPromptSet, InputError> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(InputError::CsvTooShort);
    }

    let columns: Vec<_> = split_row(lines[0].1).iter().map(|h| field_for(h)).collect();

    let mut parsed = ParsedPromptSet::default();
    for &(line_no, line) in &lines[1..] {
        let values = split_row(line);
        let mut record = RawTaskRecord::default();
        for (idx, column) in columns.iter().enumerate() {
            if let Some(field) = column {
                let value = values.get(idx).map(String::as_str).unwrap_or("");
                apply_text(&mut record, *field, value);
            }
        }

        if record.has_prompt() {
            parsed.records.push(record);
        } else {
            tracing::debug!(line = line_no, "csv row without prompt dropped");
            parsed
                .diagnostics
                .push(Diagnostic::BlankPromptDropped { line: line_no });
        }
    }

    Ok(parsed)
}

/// Splits one CSV row. Commas inside double quotes are literal, `""` inside
/// quotes is an escaped quote, and every cell is trimmed.
pub fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

//! Input Processing Module
//!
//! Turns a batch document (JSON array or CSV table) into raw task records:
//! - JSON objects map their keys through the same synonym table as CSV headers
//! - CSV supports quoted cells and pipe-separated reference lists
//! - Rows dropped while parsing are returned as diagnostics

mod csv;
mod fields;
mod json;
mod parser;

pub use csv::split_row;
pub use fields::{field_for, RecordField};
pub use parser::{InputFormat, ParsedPromptSet, PromptSetParser};

//! Core of the batch image generator: prompt document parsing, task
//! normalization, reference resolution and the chunked job runner.

pub mod api;
pub mod config;
pub mod error;
pub mod executor;
pub mod files;
pub mod generation;
pub mod input;
pub mod task;

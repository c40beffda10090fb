//! imggen-cli library: exposes the command modules for unit tests

pub mod app;
pub mod commands;
pub mod utils;

#[cfg(test)]
mod test_support;

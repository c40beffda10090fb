#[allow(clippy::module_inception)]
pub mod error;
pub mod input;
pub mod task;

pub use error::CliError;
pub use input::InputError;
pub use task::{ErrorCode, TaskError};

// executor crate

pub mod command;
pub mod engine;

// Re-export public items
pub use command::{build_command, CommandError};
pub use engine::{Executor, ExecutorError, ValidationRun};

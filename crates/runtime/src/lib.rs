// runtime crate

pub mod config;
pub mod process;

pub use config::RuntimeConfig;
pub use process::{ProcessOutput, ProcessRuntime, RuntimeError, ValidatorRuntime};

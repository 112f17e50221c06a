// models crate

mod language;
mod options;
mod result;

pub use language::Language;
pub use options::{OptionSettings, OptionsError, ValidationOptions};
pub use result::{ValidationResult, BROKEN_REQUEST_MESSAGE};

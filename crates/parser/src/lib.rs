// parser crate

pub mod output;

pub use output::{Classification, OutputMarkers, OutputParser};

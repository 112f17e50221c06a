use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const BROKEN_REQUEST_MESSAGE: &str =
    "Something about your validation request is contradictory or poorly-formed.";

/// Outcome of a single validator invocation.
///
/// Serializes as a flat record: `equality`, `output_file`, `valid`, `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub equality: bool,
    pub output_file: PathBuf,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    // Starts out invalid until the validator output says otherwise.
    pub fn new(output_file: &Path, equality: bool) -> Self {
        ValidationResult {
            equality,
            output_file: output_file.to_path_buf(),
            valid: false,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn broken_validation_request(&mut self) {
        self.valid = false;
        self.errors = vec![BROKEN_REQUEST_MESSAGE.to_string()];
    }

    pub fn is_broken_request(&self) -> bool {
        !self.valid && self.errors.len() == 1 && self.errors[0] == BROKEN_REQUEST_MESSAGE
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_is_invalid_and_empty() {
        let result = ValidationResult::new(Path::new("work/a.xml"), true);
        assert!(!result.valid);
        assert!(result.equality);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_broken_request_replaces_errors() {
        let mut result = ValidationResult::new(Path::new("work/a.xml"), false);
        result.valid = true;
        result.errors.push("Warning: leftover".to_string());

        result.broken_validation_request();

        assert!(!result.valid);
        assert_eq!(result.errors, vec![BROKEN_REQUEST_MESSAGE.to_string()]);
        assert!(result.is_broken_request());
    }

    #[test]
    fn test_add_error_marks_invalid() {
        let mut result = ValidationResult::new(Path::new("work/a.xml"), false);
        result.valid = true;
        result.add_error("stack overflow".to_string());
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["stack overflow".to_string()]);
    }

    #[test]
    fn test_serializes_as_flat_record() {
        let mut result = ValidationResult::new(Path::new("work/a.gb"), false);
        result.add_error("Error: bad URI".to_string());

        let value = result.to_json().unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "equality": false,
                "output_file": "work/a.gb",
                "valid": false,
                "errors": ["Error: bad URI"],
            })
        );
    }
}

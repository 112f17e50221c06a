//! Classification of the validator's free-text output.
//!
//! The validator prints a fixed phrase on success and another one before
//! its error listing on failure. Both phrases live in [`OutputMarkers`] so
//! a validator release that rewords them only needs new marker values.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUCCESS_MARKER: &str = "Validation successful, no errors.";
pub const DEFAULT_FAILURE_MARKER: &str = "Validation failed.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMarkers {
    pub success: String,
    pub failure: String,
}

impl Default for OutputMarkers {
    fn default() -> Self {
        OutputMarkers {
            success: DEFAULT_SUCCESS_MARKER.to_string(),
            failure: DEFAULT_FAILURE_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OutputParser {
    markers: OutputMarkers,
}

impl OutputParser {
    pub fn new(markers: OutputMarkers) -> Self {
        OutputParser { markers }
    }

    pub fn markers(&self) -> &OutputMarkers {
        &self.markers
    }

    /// Decide validity and pull the error lines out of `output`.
    ///
    /// Output carrying the success marker is valid, but any other non-blank
    /// lines printed next to it are still reported as errors.
    pub fn classify(&self, output: &str) -> Classification {
        if !self.is_success(output) {
            return Classification {
                valid: false,
                errors: self.digest_errors(output),
            };
        }

        let remainder = strip_boundary(output, &self.markers.success);
        Classification {
            valid: true,
            errors: self.digest_errors(remainder),
        }
    }

    /// Non-blank lines of `output` once the failure marker is peeled off.
    pub fn digest_errors(&self, output: &str) -> Vec<String> {
        strip_boundary(output, &self.markers.failure)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    // Substring containment, the marker may sit anywhere in the text
    fn is_success(&self, output: &str) -> bool {
        !self.markers.success.is_empty() && output.contains(&self.markers.success)
    }
}

// Peels `marker` off both ends until it no longer appears there. Lines keep
// their own indentation, only whitespace touching the marker goes.
fn strip_boundary<'a>(text: &'a str, marker: &str) -> &'a str {
    let mut current = trim_blank_lines(text);
    if marker.is_empty() {
        return current;
    }

    loop {
        let mut next = current;
        if let Some(rest) = next.trim_start().strip_prefix(marker) {
            next = rest.trim_start_matches([' ', '\t']);
        }
        if let Some(rest) = next.trim_end().strip_suffix(marker) {
            next = rest;
        }
        let next = trim_blank_lines(next);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

// Drops leading blank lines and trailing whitespace.
fn trim_blank_lines(text: &str) -> &str {
    let text = text.trim_end();
    let content_start = text.len() - text.trim_start().len();
    let line_start = text[..content_start]
        .rfind('\n')
        .map(|newline| newline + 1)
        .unwrap_or(0);
    &text[line_start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_marker_alone_is_valid_without_errors() {
        let parser = OutputParser::default();
        let classification = parser.classify("Validation successful, no errors.");
        assert!(classification.valid);
        assert!(classification.errors.is_empty());
    }

    #[test]
    fn test_failure_lists_errors_in_order() {
        let parser = OutputParser::default();
        let classification =
            parser.classify("Validation failed.\nError: bad URI\nError: missing field");
        assert!(!classification.valid);
        assert_eq!(
            classification.errors,
            vec!["Error: bad URI".to_string(), "Error: missing field".to_string()]
        );
    }

    #[test]
    fn test_output_without_any_marker_is_invalid() {
        let parser = OutputParser::default();
        let classification = parser.classify("Exception in thread \"main\"\n\tat Foo.bar\n");
        assert!(!classification.valid);
        assert_eq!(
            classification.errors,
            vec![
                "Exception in thread \"main\"".to_string(),
                "\tat Foo.bar".to_string()
            ]
        );
    }

    #[test]
    fn test_success_keeps_leftover_lines_as_errors() {
        let parser = OutputParser::default();
        let classification = parser.classify(
            "Warning: sbol-10204 best practice\n\nValidation successful, no errors.\n",
        );
        assert!(classification.valid);
        assert_eq!(
            classification.errors,
            vec!["Warning: sbol-10204 best practice".to_string()]
        );
    }

    #[test]
    fn test_first_error_line_keeps_its_indentation() {
        let parser = OutputParser::default();
        let classification = parser.classify("Validation failed.\n\tat Foo.bar\n\tat Foo.main");
        assert!(!classification.valid);
        assert_eq!(
            classification.errors,
            vec!["\tat Foo.bar".to_string(), "\tat Foo.main".to_string()]
        );
    }

    #[test]
    fn test_whitespace_next_to_marker_is_dropped() {
        let parser = OutputParser::default();
        let errors = parser.digest_errors("  Validation failed.  Error: inline\n");
        assert_eq!(errors, vec!["Error: inline".to_string()]);
    }

    #[test]
    fn test_success_marker_matches_as_substring() {
        let parser = OutputParser::default();
        let classification =
            parser.classify("INFO: Validation successful, no errors. (3 documents)");
        assert!(classification.valid);
    }

    #[test]
    fn test_crlf_and_blank_lines_are_dropped() {
        let parser = OutputParser::default();
        let errors = parser.digest_errors("Validation failed.\r\n\r\nError: a\r\n   \r\nError: b\r\n");
        assert_eq!(errors, vec!["Error: a".to_string(), "Error: b".to_string()]);
    }

    #[test]
    fn test_digest_is_idempotent() {
        let parser = OutputParser::default();
        let samples = [
            "Validation failed.\nError: bad URI\nError: missing field",
            "Validation failed.\nValidation failed.\nError: x",
            "  Validation failed.  \n  Validation failed.\nError: y\nValidation failed.",
            "Validation successful, no errors.",
            "",
        ];

        for sample in samples {
            let once = parser.digest_errors(sample);
            let twice = parser.digest_errors(&once.join("\n"));
            assert_eq!(once, twice, "digest not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_custom_markers() {
        let parser = OutputParser::new(OutputMarkers {
            success: "OK".to_string(),
            failure: "FAILED".to_string(),
        });

        assert!(parser.classify("all OK").valid);

        let classification = parser.classify("FAILED\nbad thing");
        assert!(!classification.valid);
        assert_eq!(classification.errors, vec!["bad thing".to_string()]);
    }

    #[test]
    fn test_empty_success_marker_never_matches() {
        let parser = OutputParser::new(OutputMarkers {
            success: String::new(),
            failure: DEFAULT_FAILURE_MARKER.to_string(),
        });
        assert!(!parser.classify("anything").valid);
    }
}

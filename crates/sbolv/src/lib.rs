pub mod report;

pub use executor::{build_command, CommandError, Executor, ExecutorError, ValidationRun};
pub use models::{Language, OptionSettings, OptionsError, ValidationOptions, ValidationResult};
pub use parser::{OutputMarkers, OutputParser};
pub use runtime::{ProcessRuntime, RuntimeConfig, RuntimeError, ValidatorRuntime};

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome for one file of a batch.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    #[serde(flatten)]
    pub result: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.result.as_ref().map(|r| r.valid).unwrap_or(false)
    }
}

/// Validate `files` with the same settings, at most `jobs` at a time.
///
/// Reports come back in the order of `files`. Every file gets its own
/// output artifact path.
pub async fn validate_files(
    executor: &Executor,
    files: &[PathBuf],
    settings: &OptionSettings,
    diff_file: Option<&Path>,
    jobs: usize,
) -> Vec<FileReport> {
    stream::iter(files.iter().cloned())
        .map(|file| {
            let run = ValidationRun::new(
                executor.options(settings.clone()),
                file.clone(),
                diff_file.map(Path::to_path_buf),
            );
            async move {
                match run.execute(executor).await {
                    Ok(result) => FileReport {
                        file,
                        result: Some(result),
                        error: None,
                    },
                    Err(e) => {
                        logging::error(&format!("Failed to validate {}: {}", file.display(), e));
                        FileReport {
                            file,
                            result: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            }
        })
        .buffered(jobs.max(1))
        .collect()
        .await
}

/// Render a command line so it can be pasted into a POSIX shell.
pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_join_quotes_only_when_needed() {
        let args = vec![
            "java".to_string(),
            "-jar".to_string(),
            "/opt/lib SBOLj.jar".to_string(),
            "it's.xml".to_string(),
            String::new(),
        ];
        assert_eq!(
            shell_join(&args),
            r#"java -jar '/opt/lib SBOLj.jar' 'it'\''s.xml' ''"#
        );
    }

    #[test]
    fn test_file_report_flattens_result() {
        let mut result = ValidationResult::new(Path::new("work/x.xml"), false);
        result.valid = true;
        let report = FileReport {
            file: PathBuf::from("a.xml"),
            result: Some(result),
            error: None,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "file": "a.xml",
                "equality": false,
                "output_file": "work/x.xml",
                "valid": true,
                "errors": [],
            })
        );
        assert!(report.is_valid());
    }

    #[test]
    fn test_file_report_with_error() {
        let report = FileReport {
            file: PathBuf::from("a.xml"),
            result: None,
            error: Some("Validator executable 'java' not found".to_string()),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "file": "a.xml",
                "error": "Validator executable 'java' not found",
            })
        );
        assert!(!report.is_valid());
    }
}

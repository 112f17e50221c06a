use models::ValidationOptions;
use std::path::Path;
use thiserror::Error;

/// A request that cannot be turned into a validator invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Equality testing requires a second file to compare against")]
    MissingDiffFile,

    #[error("'continue_after_first_error' cannot be combined with 'provide_detailed_stack_trace'")]
    ConflictingErrorReporting,
}

/// Translate `options` into the validator's argument list.
///
/// `invocation` is the leading program/archive part (for example
/// `java -jar libSBOLj.jar`). Flags are appended in a fixed order, so equal
/// options always produce the same command. In equality mode only `-e` is
/// added after the common arguments.
pub fn build_command(
    options: &ValidationOptions,
    invocation: &[String],
    validation_file: &Path,
    diff_file: Option<&Path>,
) -> Result<Vec<String>, CommandError> {
    let settings = options.settings();

    let mut command: Vec<String> = invocation.to_vec();
    command.extend([
        path_arg(validation_file),
        "-o".to_string(),
        path_arg(options.output_file()),
        "-l".to_string(),
        settings.language.to_string(),
    ]);

    if settings.test_equality {
        let diff_file = diff_file.ok_or(CommandError::MissingDiffFile)?;
        command.extend(["-e".to_string(), path_arg(diff_file)]);
        return Ok(command);
    }

    if let Some(subset_uri) = &settings.subset_uri {
        command.extend(["-s".to_string(), subset_uri.clone()]);
    }

    if settings.continue_after_first_error {
        if settings.provide_detailed_stack_trace {
            return Err(CommandError::ConflictingErrorReporting);
        }
        command.push("-f".to_string());
    }

    if settings.provide_detailed_stack_trace {
        command.push("-d".to_string());
    }

    if !settings.check_uri_compliance {
        command.push("-n".to_string());
    }

    if !settings.check_completeness {
        command.push("-i".to_string());
    }

    if settings.check_best_practices {
        command.push("-b".to_string());
    }

    if let Some(uri_prefix) = &settings.uri_prefix {
        command.extend(["-p".to_string(), uri_prefix.clone()]);
    }

    if let Some(version) = &settings.version {
        command.extend(["-v".to_string(), version.clone()]);
    }

    if settings.insert_type {
        command.push("-t".to_string());
    }

    Ok(command)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

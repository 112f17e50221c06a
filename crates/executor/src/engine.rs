use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::command::{build_command, CommandError};
use models::{OptionSettings, ValidationOptions, ValidationResult};
use parser::OutputParser;
use runtime::{ProcessRuntime, RuntimeConfig, RuntimeError, ValidatorRuntime};

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything needed to launch the validator and read its verdict.
#[derive(Clone)]
pub struct Executor {
    config: RuntimeConfig,
    runtime: Arc<dyn ValidatorRuntime>,
    parser: OutputParser,
}

impl Executor {
    pub fn new(config: RuntimeConfig) -> Self {
        let runtime = Arc::new(ProcessRuntime::new(config.timeout));
        Self::with_runtime(config, runtime)
    }

    pub fn with_runtime(config: RuntimeConfig, runtime: Arc<dyn ValidatorRuntime>) -> Self {
        Executor {
            config,
            runtime,
            parser: OutputParser::default(),
        }
    }

    pub fn with_parser(mut self, parser: OutputParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Options for one run, writing into the configured output directory.
    pub fn options(&self, settings: OptionSettings) -> ValidationOptions {
        ValidationOptions::new(settings, &self.config.output_dir)
    }
}

/// One file (and optionally its comparison partner) to put through the validator.
#[derive(Debug, Clone)]
pub struct ValidationRun {
    options: ValidationOptions,
    validation_file: PathBuf,
    diff_file: Option<PathBuf>,
}

impl ValidationRun {
    pub fn new(
        options: ValidationOptions,
        validation_file: impl Into<PathBuf>,
        diff_file: Option<PathBuf>,
    ) -> Self {
        ValidationRun {
            options,
            validation_file: validation_file.into(),
            diff_file,
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn validation_file(&self) -> &Path {
        &self.validation_file
    }

    pub fn command(&self, executor: &Executor) -> Result<Vec<String>, CommandError> {
        build_command(
            &self.options,
            &executor.config.invocation(),
            &self.validation_file,
            self.diff_file.as_deref(),
        )
    }

    /// Run the validator and interpret what it printed.
    ///
    /// Malformed requests and non-zero exits come back as invalid results;
    /// only failures to launch or observe the process are errors.
    pub async fn execute(&self, executor: &Executor) -> Result<ValidationResult, ExecutorError> {
        let mut result =
            ValidationResult::new(self.options.output_file(), self.options.test_equality());

        let command = match self.command(executor) {
            Ok(command) => command,
            Err(e) => {
                logging::warning(&format!(
                    "Rejected validation request for {}: {}",
                    self.validation_file.display(),
                    e
                ));
                result.broken_validation_request();
                return Ok(result);
            }
        };

        let output_dir = executor.config.resolved_output_dir();
        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|source| ExecutorError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;

        logging::info(&format!("Validating {}", self.validation_file.display()));

        let output = executor
            .runtime
            .run(&command, &executor.config.working_dir)
            .await?;

        if !output.success() {
            logging::debug(&format!(
                "Validator exited with code {} for {}",
                output.exit_code,
                self.validation_file.display()
            ));
            let text = output.output.trim_end();
            if text.is_empty() {
                result.add_error(format!("Validator exited with code {}", output.exit_code));
            } else {
                result.add_error(text.to_string());
            }
            return Ok(result);
        }

        let classification = executor.parser.classify(&output.output);
        result.valid = classification.valid;
        result.errors = classification.errors;

        Ok(result)
    }
}

use async_trait::async_trait;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("No command specified")]
    EmptyCommand,

    #[error("Validator executable '{program}' not found: {reason}")]
    ExecutableNotFound { program: String, reason: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' did not finish within {} seconds", .after.as_secs())]
    Timeout { program: String, after: Duration },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Exit status and combined stdout/stderr of one validator process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub output: String,
    pub exit_code: i32,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[async_trait]
pub trait ValidatorRuntime: Send + Sync {
    /// Run `command` (program first) inside `working_dir` until it exits.
    async fn run(&self, command: &[String], working_dir: &Path)
        -> Result<ProcessOutput, RuntimeError>;
}

/// Runs the validator as a child process of this one.
#[derive(Debug, Clone, Default)]
pub struct ProcessRuntime {
    timeout: Option<Duration>,
}

impl ProcessRuntime {
    pub fn new(timeout: Option<Duration>) -> Self {
        ProcessRuntime { timeout }
    }
}

#[async_trait]
impl ValidatorRuntime for ProcessRuntime {
    async fn run(
        &self,
        command: &[String],
        working_dir: &Path,
    ) -> Result<ProcessOutput, RuntimeError> {
        let (program, args) = command.split_first().ok_or(RuntimeError::EmptyCommand)?;
        let executable = resolve_executable(program, working_dir)?;

        logging::debug(&format!(
            "Running {} in {}",
            command.join(" "),
            working_dir.display()
        ));

        // stdout and stderr share one pipe so their interleaving survives
        let (mut reader, writer) = io::pipe()?;
        let mut process = Command::new(&executable);
        process
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .kill_on_drop(true);

        let mut child = process.spawn().map_err(|source| RuntimeError::Spawn {
            program: program.clone(),
            source,
        })?;
        // Reading only reaches EOF once our copies of the write end are closed
        drop(process);

        let collector = tokio::task::spawn_blocking(move || {
            let mut buffer = Vec::new();
            reader.read_to_end(&mut buffer).map(|_| buffer)
        });

        // Descendants may hold the pipe open after the child exits, so the
        // limit covers collecting the output as well as waiting
        let finished = async {
            let status = child.wait().await?;
            let buffer = collector.await.map_err(io::Error::other)??;
            Ok::<_, RuntimeError>((status, buffer))
        };

        let (status, buffer) = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, finished).await {
                Ok(done) => done?,
                Err(_) => {
                    if let Ok(None) = child.try_wait() {
                        if let Err(e) = child.kill().await {
                            logging::warning(&format!("Failed to kill '{}': {}", program, e));
                        }
                    }
                    return Err(RuntimeError::Timeout {
                        program: program.clone(),
                        after: limit,
                    });
                }
            },
            None => finished.await?,
        };

        let exit_code = status.code().unwrap_or(-1);

        logging::debug(&format!("'{}' exited with code {}", program, exit_code));

        Ok(ProcessOutput {
            output: String::from_utf8_lossy(&buffer).into_owned(),
            exit_code,
        })
    }
}

// Bare names go through PATH. Anything with a separator must exist as given,
// relative paths counting from the directory the validator runs in.
fn resolve_executable(program: &str, working_dir: &Path) -> Result<PathBuf, RuntimeError> {
    let path = Path::new(program);
    if path.components().count() > 1 || path.is_absolute() {
        return working_dir
            .join(path)
            .canonicalize()
            .map_err(|e| RuntimeError::ExecutableNotFound {
                program: program.to_string(),
                reason: e.to_string(),
            });
    }

    which::which(program).map_err(|e| RuntimeError::ExecutableNotFound {
        program: program.to_string(),
        reason: e.to_string(),
    })
}

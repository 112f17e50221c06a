use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use sbolv_lib::{
    report, shell_join, validate_files, Executor, Language, OptionSettings, RuntimeConfig,
    ValidationRun,
};

#[derive(Debug, Parser)]
#[command(
    name = "sbolv",
    about = "Run the libSBOLj validator and report its verdict",
    version,
    long_about = "Builds the libSBOLj validator command line from a set of options, runs it and turns its output into a pass/fail result.\n\nExamples:\n  sbolv validate design.xml                          # Validate one SBOL2 document\n  sbolv validate designs/ --json                     # Validate a directory, JSON output\n  sbolv validate a.xml --diff b.xml                  # Compare two documents\n  sbolv command design.xml --language GenBank        # Print the validator command only"
)]
struct Sbolv {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode with detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode with extensive execution details
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a file, or every candidate file of a directory
    Validate {
        /// File or directory to validate
        path: PathBuf,

        #[command(flatten)]
        options: OptionFlags,

        #[command(flatten)]
        runtime: RuntimeFlags,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Number of validator processes to run at once (defaults to the CPU count)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Print the validator command line without running it
    Command {
        /// File that would be validated
        file: PathBuf,

        #[command(flatten)]
        options: OptionFlags,

        #[command(flatten)]
        runtime: RuntimeFlags,
    },
}

#[derive(Debug, Args)]
struct OptionFlags {
    /// Load validation options from a JSON or YAML file; flags below override it
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Output language (SBOL2, SBOL1, GenBank, FASTA)
    #[arg(short, long)]
    language: Option<String>,

    /// Only validate below this URI
    #[arg(long, value_name = "URI")]
    subset_uri: Option<String>,

    /// Keep going after the first error
    #[arg(long)]
    continue_after_first_error: bool,

    /// Include stack traces in error reports
    #[arg(long)]
    detailed_stack_trace: bool,

    /// Skip the URI compliance check
    #[arg(long)]
    no_uri_compliance: bool,

    /// Skip the completeness check
    #[arg(long)]
    no_completeness: bool,

    /// Also check best practices
    #[arg(long)]
    best_practices: bool,

    /// URI prefix for converted objects
    #[arg(long, value_name = "URI")]
    uri_prefix: Option<String>,

    /// Version for converted objects
    #[arg(long, value_name = "VERSION")]
    version_string: Option<String>,

    /// Insert the object type into generated URIs
    #[arg(long)]
    insert_type: bool,

    /// Compare against the --diff file instead of validating
    #[arg(long)]
    test_equality: bool,

    /// Second file for equality testing (implies --test-equality)
    #[arg(long, value_name = "FILE")]
    diff: Option<PathBuf>,
}

impl OptionFlags {
    fn settings(&self) -> Result<OptionSettings, String> {
        let mut settings = match &self.options {
            Some(path) => OptionSettings::from_path(path).map_err(|e| e.to_string())?,
            None => OptionSettings::default(),
        };

        if let Some(language) = &self.language {
            settings.language = Language::from(language.as_str());
        }
        if let Some(uri) = &self.subset_uri {
            settings.subset_uri = Some(uri.clone());
        }
        if self.continue_after_first_error {
            settings.continue_after_first_error = true;
        }
        if self.detailed_stack_trace {
            settings.provide_detailed_stack_trace = true;
        }
        if self.no_uri_compliance {
            settings.check_uri_compliance = false;
        }
        if self.no_completeness {
            settings.check_completeness = false;
        }
        if self.best_practices {
            settings.check_best_practices = true;
        }
        if let Some(prefix) = &self.uri_prefix {
            settings.uri_prefix = Some(prefix.clone());
        }
        if let Some(version) = &self.version_string {
            settings.version = Some(version.clone());
        }
        if self.insert_type {
            settings.insert_type = true;
        }
        if self.test_equality || self.diff.is_some() {
            settings.test_equality = true;
        }

        Ok(settings)
    }

    fn diff_file(&self) -> Result<Option<PathBuf>, String> {
        self.diff.as_deref().map(absolute).transpose()
    }
}

#[derive(Debug, Args)]
struct RuntimeFlags {
    /// Java executable, relative paths start from --workdir [env: SBOLV_JAVA]
    #[arg(long, value_name = "PATH")]
    java: Option<String>,

    /// Validator archive [env: SBOLV_JAR]
    #[arg(long, value_name = "PATH")]
    jar: Option<PathBuf>,

    /// Directory the validator runs in [env: SBOLV_WORKDIR]
    #[arg(long, value_name = "DIR")]
    workdir: Option<PathBuf>,

    /// Directory for converted output files [env: SBOLV_OUTPUT_DIR]
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Seconds before the validator is killed, 0 waits forever [env: SBOLV_TIMEOUT]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl RuntimeFlags {
    fn config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::from_env();

        if let Some(java) = &self.java {
            config.program = java.clone();
        }
        if let Some(jar) = &self.jar {
            config.archive = jar.clone();
        }
        if let Some(dir) = &self.workdir {
            config.working_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            config.timeout = runtime::config::timeout_from_secs(secs);
        }

        config
    }
}

// The validator runs elsewhere, so caller-relative paths must be made absolute
fn absolute(path: &Path) -> Result<PathBuf, String> {
    std::path::absolute(path).map_err(|e| format!("Invalid path {}: {}", path.display(), e))
}

fn exit_with_config_error(message: &str) -> ! {
    logging::error(message);
    std::process::exit(2);
}

#[tokio::main]
async fn main() {
    let cli = Sbolv::parse();
    let verbose = cli.verbose;
    let debug = cli.debug;

    // Set log level based on command line flags
    if debug {
        logging::set_log_level(logging::LogLevel::Debug);
        logging::debug("Debug mode enabled - showing detailed logs");
    } else if verbose {
        logging::set_log_level(logging::LogLevel::Info);
        logging::info("Verbose mode enabled");
    } else {
        logging::set_log_level(logging::LogLevel::Warning);
    }

    match &cli.command {
        Commands::Validate {
            path,
            options,
            runtime,
            json,
            jobs,
        } => {
            let settings = options
                .settings()
                .unwrap_or_else(|e| exit_with_config_error(&e));
            let diff_file = options
                .diff_file()
                .unwrap_or_else(|e| exit_with_config_error(&e));
            let executor = Executor::new(runtime.config());

            let files = match utils::collect_files(path) {
                Ok(files) => files,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let files: Vec<PathBuf> = files
                .iter()
                .map(|file| absolute(file))
                .collect::<Result<_, _>>()
                .unwrap_or_else(|e| exit_with_config_error(&e));

            if files.is_empty() {
                println!("No files to validate in {}", path.display());
                return;
            }

            let jobs = jobs.unwrap_or_else(num_cpus::get);
            if !json {
                println!("Validating {} file(s)...", files.len());
            }

            let reports =
                validate_files(&executor, &files, &settings, diff_file.as_deref(), jobs).await;

            let failures = if *json {
                let rendered = if path.is_dir() {
                    serde_json::to_string_pretty(&reports)
                } else {
                    match (&reports[0].result, &reports[0].error) {
                        (Some(result), _) => serde_json::to_string_pretty(result),
                        (None, error) => {
                            eprintln!("Error: {}", error.as_deref().unwrap_or("unknown error"));
                            std::process::exit(1);
                        }
                    }
                };
                match rendered {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error: failed to render results: {}", e);
                        std::process::exit(1);
                    }
                }
                reports.iter().filter(|report| !report.is_valid()).count()
            } else {
                report::print_reports(&reports, verbose || debug)
            };

            if failures > 0 {
                std::process::exit(1);
            }
        }

        Commands::Command {
            file,
            options,
            runtime,
        } => {
            let settings = options
                .settings()
                .unwrap_or_else(|e| exit_with_config_error(&e));
            let diff_file = options
                .diff_file()
                .unwrap_or_else(|e| exit_with_config_error(&e));
            let file = absolute(file).unwrap_or_else(|e| exit_with_config_error(&e));
            let executor = Executor::new(runtime.config());

            let run = ValidationRun::new(executor.options(settings), file, diff_file);
            match run.command(&executor) {
                Ok(command) => println!("{}", shell_join(&command)),
                Err(e) => {
                    eprintln!("{}", models::BROKEN_REQUEST_MESSAGE);
                    eprintln!("Reason: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

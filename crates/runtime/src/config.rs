use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROGRAM: &str = "java";
pub const DEFAULT_ARCHIVE: &str = "libSBOLj.jar";
pub const DEFAULT_OUTPUT_DIR: &str = "work";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Where and how the validator gets launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Interpreter used to run the archive
    pub program: String,
    /// Validator archive passed after `-jar`
    pub archive: PathBuf,
    /// Directory the validator runs in
    pub working_dir: PathBuf,
    /// Directory for converted artifacts, relative paths resolve against `working_dir`
    pub output_dir: PathBuf,
    /// `None` waits for the validator forever
    pub timeout: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            program: DEFAULT_PROGRAM.to_string(),
            archive: PathBuf::from(DEFAULT_ARCHIVE),
            working_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `SBOLV_JAVA`, `SBOLV_JAR`, `SBOLV_WORKDIR`,
    /// `SBOLV_OUTPUT_DIR` and `SBOLV_TIMEOUT` (seconds, 0 disables).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = RuntimeConfig::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(program) = get("SBOLV_JAVA") {
            config.program = program;
        }
        if let Some(archive) = get("SBOLV_JAR") {
            config.archive = PathBuf::from(archive);
        }
        if let Some(dir) = get("SBOLV_WORKDIR") {
            config.working_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("SBOLV_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(secs) = get("SBOLV_TIMEOUT") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.timeout = timeout_from_secs(secs),
                Err(_) => logging::warning(&format!(
                    "Ignoring SBOLV_TIMEOUT={}: not a number of seconds",
                    secs
                )),
            }
        }

        config
    }

    /// Leading arguments of every validator command line.
    pub fn invocation(&self) -> Vec<String> {
        vec![
            self.program.clone(),
            "-jar".to_string(),
            self.archive.to_string_lossy().into_owned(),
        ]
    }

    /// Output directory as seen from the current process.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.working_dir.join(&self.output_dir)
    }
}

pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_invocation() {
        let config = RuntimeConfig::default();
        assert_eq!(config.invocation(), vec!["java", "-jar", "libSBOLj.jar"]);
        assert_eq!(config.timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("SBOLV_JAVA", "/usr/bin/java"),
            ("SBOLV_JAR", "/opt/sbol/libSBOLj.jar"),
            ("SBOLV_WORKDIR", "/srv/validator"),
            ("SBOLV_OUTPUT_DIR", "results"),
            ("SBOLV_TIMEOUT", "0"),
        ]
        .into_iter()
        .collect();

        let config = RuntimeConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.program, "/usr/bin/java");
        assert_eq!(config.archive, PathBuf::from("/opt/sbol/libSBOLj.jar"));
        assert_eq!(config.working_dir, PathBuf::from("/srv/validator"));
        assert_eq!(
            config.resolved_output_dir(),
            PathBuf::from("/srv/validator/results")
        );
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_blank_and_malformed_values_keep_defaults() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            "SBOLV_JAVA" => Some("   ".to_string()),
            "SBOLV_TIMEOUT" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_absolute_output_dir_ignores_working_dir() {
        let config = RuntimeConfig {
            working_dir: PathBuf::from("/srv/validator"),
            output_dir: PathBuf::from("/tmp/out"),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.resolved_output_dir(), PathBuf::from("/tmp/out"));
    }
}

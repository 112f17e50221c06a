use crate::Language;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Validation options must be a key/value mapping, got {0}")]
    NotAMapping(String),

    #[error("Invalid validation options: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid validation options: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("Failed to read options file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported options file format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

/// The switches a caller may set for one validation.
///
/// Only the keys listed here are accepted; anything else is rejected
/// when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionSettings {
    /// Format of the file and of the converted artifact
    pub language: Language,

    /// Only validate the part of the document below this URI
    #[serde(deserialize_with = "flag_string")]
    pub subset_uri: Option<String>,

    /// Keep reporting after the first error
    pub continue_after_first_error: bool,

    /// Print the Java stack trace for each error
    pub provide_detailed_stack_trace: bool,

    pub check_uri_compliance: bool,

    pub check_completeness: bool,

    pub check_best_practices: bool,

    /// Prefix used when converting to compliant URIs
    #[serde(deserialize_with = "flag_string")]
    pub uri_prefix: Option<String>,

    /// Version assigned to converted objects
    #[serde(deserialize_with = "flag_string")]
    pub version: Option<String>,

    /// Append the type to generated URIs
    pub insert_type: bool,

    /// Compare the file against a second document instead of validating it
    pub test_equality: bool,
}

impl Default for OptionSettings {
    fn default() -> Self {
        OptionSettings {
            language: Language::default(),
            subset_uri: None,
            continue_after_first_error: false,
            provide_detailed_stack_trace: false,
            check_uri_compliance: true,
            check_completeness: true,
            check_best_practices: false,
            uri_prefix: None,
            version: None,
            insert_type: false,
            test_equality: false,
        }
    }
}

impl OptionSettings {
    /// Validate a JSON object field by field.
    pub fn from_value(data: serde_json::Value) -> Result<Self, OptionsError> {
        match data {
            serde_json::Value::Object(_) => Ok(serde_json::from_value(data)?),
            serde_json::Value::Null => Ok(Self::default()),
            other => Err(OptionsError::NotAMapping(json_kind(&other).to_string())),
        }
    }

    /// Load settings from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: &Path) -> Result<Self, OptionsError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let content = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match extension.as_str() {
            "json" => Self::from_value(serde_json::from_str(&content)?),
            "yaml" | "yml" => {
                // An empty YAML document means "all defaults"
                if content.trim().is_empty() {
                    return Ok(Self::default());
                }
                Ok(serde_yaml::from_str(&content)?)
            }
            _ => Err(OptionsError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Settings for one run together with the artifact path derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    settings: OptionSettings,
    output_file: PathBuf,
}

impl ValidationOptions {
    /// Attach a fresh `<output_dir>/<uuid><ext>` artifact path to `settings`.
    pub fn new(settings: OptionSettings, output_dir: &Path) -> Self {
        let file_name = format!(
            "{}{}",
            Uuid::new_v4(),
            settings.language.output_extension()
        );
        let output_file = output_dir.join(file_name);

        ValidationOptions {
            settings,
            output_file,
        }
    }

    /// Build options from caller-supplied key/value data.
    pub fn build(data: serde_json::Value, output_dir: &Path) -> Result<Self, OptionsError> {
        let settings = OptionSettings::from_value(data)?;
        Ok(Self::new(settings, output_dir))
    }

    pub fn settings(&self) -> &OptionSettings {
        &self.settings
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn language(&self) -> &Language {
        &self.settings.language
    }

    pub fn test_equality(&self) -> bool {
        self.settings.test_equality
    }
}

// String options have historically been switched off with `false`.
fn flag_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagOrText {
        Flag(bool),
        Text(String),
    }

    match Option::<FlagOrText>::deserialize(deserializer)? {
        None | Some(FlagOrText::Flag(false)) => Ok(None),
        Some(FlagOrText::Flag(true)) => Err(D::Error::custom(
            "expected a string or `false`, found `true`",
        )),
        Some(FlagOrText::Text(text)) if text.is_empty() => Ok(None),
        Some(FlagOrText::Text(text)) => Ok(Some(text)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

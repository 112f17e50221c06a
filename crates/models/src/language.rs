use serde::{Deserialize, Serialize};
use std::fmt;

/// Input/output format handed to the validator through `-l`.
///
/// Names the validator does not know are passed through untouched so that
/// newer validator releases keep working without a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    Sbol2,
    Sbol1,
    GenBank,
    Fasta,
    Other(String),
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Language::Sbol2 => "SBOL2",
            Language::Sbol1 => "SBOL1",
            Language::GenBank => "GenBank",
            Language::Fasta => "FASTA",
            Language::Other(name) => name,
        }
    }

    /// Extension (with leading dot) of the artifact the validator writes.
    pub fn output_extension(&self) -> &'static str {
        match self {
            Language::Sbol2 | Language::Sbol1 => ".xml",
            Language::GenBank => ".gb",
            _ => ".fasta",
        }
    }
}

impl From<String> for Language {
    fn from(name: String) -> Self {
        match name.as_str() {
            "SBOL2" => Language::Sbol2,
            "SBOL1" => Language::Sbol1,
            "GenBank" => Language::GenBank,
            "FASTA" => Language::Fasta,
            _ => Language::Other(name),
        }
    }
}

impl From<&str> for Language {
    fn from(name: &str) -> Self {
        Language::from(name.to_string())
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.as_str().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_round_trip_through_as_str() {
        for name in ["SBOL2", "SBOL1", "GenBank", "FASTA"] {
            assert_eq!(Language::from(name).as_str(), name);
        }
    }

    #[test]
    fn test_output_extension_per_language() {
        assert_eq!(Language::Sbol2.output_extension(), ".xml");
        assert_eq!(Language::Sbol1.output_extension(), ".xml");
        assert_eq!(Language::GenBank.output_extension(), ".gb");
        assert_eq!(Language::Fasta.output_extension(), ".fasta");
        assert_eq!(Language::from("SBOL3").output_extension(), ".fasta");
    }

    #[test]
    fn test_unknown_language_is_kept_verbatim() {
        let language = Language::from("sbol2");
        assert_eq!(language, Language::Other("sbol2".to_string()));
        assert_eq!(language.to_string(), "sbol2");
    }
}

//! Optional TOML settings file.
//!
//! ```toml
//! [logging]
//! level = "info"          # any EnvFilter directive
//! file = "netpay.log"     # append log records here as well
//!
//! [report]
//! format = "csv"          # "text" (default) or "csv"
//! ```
//!
//! Missing sections and keys take their defaults. Command-line flags win over
//! the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::report::OutputFormat;

/// Default log filter when neither the command line, `RUST_LOG` nor the
/// settings file name one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// EnvFilter directive.
    pub level: String,
    /// Log file, opened in append mode. The directory must already exist.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    pub format: OutputFormat,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Reads and parses a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    /// Loads `path` if one was given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.report.format, OutputFormat::Text);
    }

    #[test]
    fn full_file_is_parsed() {
        let settings = Settings::from_toml_str(
            r#"
            [logging]
            level = "debug"
            file = "netpay.log"

            [report]
            format = "csv"
            "#,
        )
        .unwrap();

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.file, Some(PathBuf::from("netpay.log")));
        assert_eq!(settings.report.format, OutputFormat::Csv);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let settings = Settings::from_toml_str("[logging]\nfile = \"out.log\"\n").unwrap();

        assert_eq!(settings.logging.level, DEFAULT_LOG_LEVEL);
        assert_eq!(settings.report, ReportSettings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml_str("[report]\ncolour = true\n").is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Settings::from_toml_str("[report]\nformat = \"pdf\"\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Settings::load_or_default(Some(Path::new("/this/path/does/not/exist.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }
}

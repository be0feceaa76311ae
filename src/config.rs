//! Run configuration.
//!
//! Values come from, in increasing precedence: the defaults below, an
//! optional TOML file, and the command line.
//!
//! ```toml
//! output_dir = "reportes"
//! log_dir = "logs"
//! delimiter = ";"
//! recursive = true
//! include_zip_archives = true
//! timestamp_format = "%Y%m%d_%H%M%S"
//! ```

use std::fmt::{Display, Write as _};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ConvertError;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default directory for the `process_*.log` files.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default `chrono` format of the timestamp in output file names.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Settings of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    /// CSV field delimiter. Must be a single ASCII character.
    pub delimiter: char,
    /// Descend into subdirectories of the input directory.
    pub recursive: bool,
    /// Treat `*.zip` files as archives of XML documents.
    pub include_zip_archives: bool,
    pub timestamp_format: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            delimiter: ',',
            recursive: true,
            include_zip_archives: cfg!(feature = "zip"),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ConvertConfig {
    /// Read a TOML configuration file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let config: ConvertConfig = toml::from_str(&content).map_err(|e| {
            ConvertError::Config(format!(
                "failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that cannot be expressed in the type.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !self.delimiter.is_ascii() {
            return Err(ConvertError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConvertError::Config(format!(
                "delimiter {:?} cannot separate CSV fields",
                self.delimiter
            )));
        }
        if self.timestamp_format.trim().is_empty() {
            return Err(ConvertError::Config(
                "timestamp_format must not be empty".into(),
            ));
        }
        render_stamp(&self.timestamp_format, &DateTime::<Utc>::default())?;
        Ok(())
    }

    /// The delimiter as the byte the CSV writer expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII; fall back to a comma otherwise
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

/// Render a `timestamp_format` pattern at `at`.
///
/// Unknown specifiers and stamps that are not usable inside a file name are
/// [`ConvertError::Config`].
pub fn render_stamp<Tz>(format: &str, at: &DateTime<Tz>) -> Result<String, ConvertError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut stamp = String::new();
    write!(stamp, "{}", at.format(format))
        .map_err(|_| ConvertError::Config(format!("invalid timestamp_format {format:?}")))?;
    check_stamp(&stamp)?;
    Ok(stamp)
}

/// Check that a rendered stamp can be embedded in a file name.
pub fn check_stamp(stamp: &str) -> Result<(), ConvertError> {
    if stamp.trim().is_empty() {
        return Err(ConvertError::Config("timestamp is empty".into()));
    }
    if stamp.contains(['/', '\\']) {
        return Err(ConvertError::Config(format!(
            "timestamp {stamp:?} contains a path separator"
        )));
    }
    Ok(())
}

/// Builder for [`ConvertConfig`].
///
/// # Example
///
/// ```
/// use cpe2csv::config::ConvertConfigBuilder;
///
/// let config = ConvertConfigBuilder::new()
///     .output_dir("reportes")
///     .delimiter(';')
///     .recursive(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.delimiter, ';');
/// ```
#[derive(Debug, Default)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    pub fn include_zip_archives(mut self, include: bool) -> Self {
        self.config.include_zip_archives = include;
        self
    }

    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.config.timestamp_format = format.into();
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<ConvertConfig, ConvertError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.delimiter, ',');
        assert!(config.recursive);
        assert_eq!(config.timestamp_format, "%Y%m%d_%H%M%S");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "delimiter = \";\"\nrecursive = false").unwrap();

        let config = ConvertConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.delimiter, ';');
        assert!(!config.recursive);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn invalid_values_are_config_errors() {
        assert!(matches!(
            ConvertConfigBuilder::new().delimiter('¦').build(),
            Err(ConvertError::Config(_))
        ));
        assert!(matches!(
            ConvertConfigBuilder::new().delimiter('"').build(),
            Err(ConvertError::Config(_))
        ));
        assert!(matches!(
            ConvertConfigBuilder::new().timestamp_format(" ").build(),
            Err(ConvertError::Config(_))
        ));
        assert!(matches!(
            ConvertConfigBuilder::new().timestamp_format("%Q").build(),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn timestamp_must_fit_in_a_file_name() {
        for format in ["%Y/%m", "%D", r"%Y\%m"] {
            let err = ConvertConfigBuilder::new()
                .timestamp_format(format)
                .build()
                .unwrap_err();
            assert!(err.to_string().contains("path separator"), "{format}: {err}");
        }
        assert!(
            ConvertConfigBuilder::new()
                .timestamp_format("%Y-%m-%dT%H%M%z")
                .build()
                .is_ok()
        );
        assert!(check_stamp("20240315_101500").is_ok());
        assert!(check_stamp("2024/03").is_err());
    }

    #[test]
    fn unreadable_file_is_config_error() {
        let err = ConvertConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("not/here.toml"));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "recursive = \"maybe\"").unwrap();
        assert!(matches!(
            ConvertConfig::load_from_file(file.path()),
            Err(ConvertError::Config(_))
        ));
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting tax documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The input path does not exist or is not a directory.
    #[error("input directory not found or not a directory: {}", .0.display())]
    InputDirectory(PathBuf),

    /// The output directory cannot be created or written.
    #[error("output directory {} is not usable: {reason}", path.display())]
    OutputDirectory { path: PathBuf, reason: String },

    /// Underlying filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// The bytes could not be decoded with the declared encoding.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Neither the file name nor the root element identify a supported document.
    #[error("unrecognized document type: {0}")]
    UnknownDocument(String),

    /// The XML root does not belong to the document type being extracted.
    #[error("document root <{found}> where <{expected}> was expected")]
    RootMismatch {
        expected: &'static str,
        found: String,
    },

    /// A required element is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An element is present but its value cannot be parsed.
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A ZIP archive could not be read.
    #[error("archive error: {0}")]
    Archive(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    /// Whether this error aborts the whole run rather than a single document.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InputDirectory(_) | Self::OutputDirectory { .. } | Self::Config(_)
        )
    }
}

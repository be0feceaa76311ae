use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{error, info, warn};

use super::detect::identify;
use super::output::ReportWriter;
use super::scan::{InputKind, input_kind, scan_inputs, source_name};
use crate::config::{ConvertConfig, check_stamp, render_stamp};
use crate::core::ConvertError;
use crate::records::{RunStats, Tables, extract};
use crate::ubl::decode_document;

/// A document (or archive) that was skipped.
#[derive(Debug)]
pub struct FileFailure {
    pub source: String,
    pub error: ConvertError,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub stats: RunStats,
    pub failures: Vec<FileFailure>,
    /// Sources whose document type could not be determined.
    pub unknown: Vec<String>,
    /// Report files written, in write order.
    pub outputs: Vec<PathBuf>,
    pub tables: Tables,
}

/// Converts a directory of SUNAT XML documents into CSV reports.
///
/// # Example
///
/// ```no_run
/// use cpe2csv::batch::Converter;
/// use cpe2csv::config::ConvertConfig;
///
/// let report = Converter::new(ConvertConfig::default())
///     .run("comprobantes".as_ref())
///     .unwrap();
/// println!("{} documents converted", report.stats.processed);
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
}

#[derive(Default)]
struct RunState {
    tables: Tables,
    stats: RunStats,
    failures: Vec<FileFailure>,
    unknown: Vec<String>,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert everything under `input`, stamping reports with the current
    /// local time.
    pub fn run(&self, input: &Path) -> Result<RunReport, ConvertError> {
        let stamp = format_stamp(&self.config.timestamp_format)?;
        self.run_with_stamp(input, &stamp)
    }

    /// Convert everything under `input`, naming reports `{stem}_{stamp}.csv`.
    pub fn run_with_stamp(&self, input: &Path, stamp: &str) -> Result<RunReport, ConvertError> {
        self.config.validate()?;
        check_stamp(stamp)?;
        if !input.is_dir() {
            return Err(ConvertError::InputDirectory(input.to_path_buf()));
        }
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|e| ConvertError::OutputDirectory {
            path: output_dir.clone(),
            reason: e.to_string(),
        })?;

        info!(input = %input.display(), output = %output_dir.display(), "conversion started");

        let mut state = RunState::default();
        for path in scan_inputs(input, &self.config)? {
            let source = source_name(input, &path);
            match input_kind(&path) {
                Some(InputKind::Zip) => self.process_archive(&path, &source, &mut state),
                _ => match fs::read(&path) {
                    Ok(bytes) => process_document(&source, &bytes, &mut state),
                    Err(e) => {
                        state.stats.total_files += 1;
                        fail(&mut state, source, ConvertError::Io(e));
                    }
                },
            }
        }

        let writer = ReportWriter::new(output_dir, stamp, self.config.delimiter_byte());
        let outputs = writer.write_all(&state.tables, &state.stats)?;

        info!(
            total = state.stats.total_files,
            processed = state.stats.processed,
            errors = state.stats.errors,
            unknown = state.stats.unknown,
            "conversion finished"
        );

        Ok(RunReport {
            stats: state.stats,
            failures: state.failures,
            unknown: state.unknown,
            outputs,
            tables: state.tables,
        })
    }

    #[cfg(feature = "zip")]
    fn process_archive(&self, path: &Path, source: &str, state: &mut RunState) {
        match super::archive::read_xml_members(path) {
            Ok(members) => {
                info!(archive = source, members = members.len(), "reading archive");
                for member in members {
                    let member_source = format!("{source}/{}", member.name);
                    match member.content {
                        Ok(bytes) => process_document(&member_source, &bytes, state),
                        Err(e) => {
                            state.stats.total_files += 1;
                            fail(state, member_source, e);
                        }
                    }
                }
            }
            Err(e) => {
                state.stats.total_files += 1;
                fail(state, source.to_string(), e);
            }
        }
    }

    #[cfg(not(feature = "zip"))]
    fn process_archive(&self, _path: &Path, source: &str, _state: &mut RunState) {
        warn!(archive = source, "ZIP support is not compiled in; skipping");
    }
}

fn process_document(source: &str, bytes: &[u8], state: &mut RunState) {
    state.stats.total_files += 1;

    let xml = match decode_document(bytes) {
        Ok(xml) => xml,
        Err(e) => return fail(state, source.to_string(), e),
    };

    let doc_type = match identify(source, &xml) {
        Ok(t) => t,
        Err(ConvertError::UnknownDocument(root)) => {
            warn!(source, root, "unrecognized document type; skipping");
            state.stats.unknown += 1;
            state.unknown.push(source.to_string());
            return;
        }
        Err(e) => return fail(state, source.to_string(), e),
    };

    match extract(doc_type, &xml, source) {
        Ok(extraction) => {
            info!(
                source,
                doc_type = %doc_type,
                number = extraction.record.number(),
                cui = extraction.record.cui().unwrap_or_default(),
                lines = extraction.lines.len(),
                "document processed"
            );
            state.stats.record_processed(doc_type);
            state.tables.push(extraction);
        }
        Err(e) => fail(state, source.to_string(), e),
    }
}

fn fail(state: &mut RunState, source: String, error: ConvertError) {
    error!(source = %source, error = %error, "failed to process document");
    state.stats.errors += 1;
    state.failures.push(FileFailure { source, error });
}

/// Format the current local time with a `chrono` strftime pattern.
pub fn format_stamp(format: &str) -> Result<String, ConvertError> {
    render_stamp(format, &Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_uses_configured_pattern() {
        let stamp = format_stamp("%Y%m%d_%H%M%S").unwrap();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
    }

    #[test]
    fn invalid_stamp_pattern_is_config_error() {
        assert!(matches!(
            format_stamp("%Q"),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn stamp_with_path_separator_is_rejected_before_writing() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let config = ConvertConfig {
            output_dir: out.path().join("reportes"),
            ..Default::default()
        };
        let err = Converter::new(config)
            .run_with_stamp(input.path(), "2024/03")
            .unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
        assert!(!out.path().join("reportes").exists());
    }

    #[test]
    fn output_dir_that_is_a_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, b"").unwrap();

        let config = ConvertConfig {
            output_dir: blocker,
            ..Default::default()
        };
        let err = Converter::new(config)
            .run_with_stamp(dir.path(), "t")
            .unwrap_err();
        assert!(matches!(err, ConvertError::OutputDirectory { .. }));
        assert!(err.is_fatal());
    }
}

//! Directory traversal, type detection, and report output.
//!
//! A run is linear: scan the input directory, decode and identify each
//! document, extract it, and finally write every report table. A document
//! that fails anywhere along the way is logged, counted and skipped; only
//! an unusable input or output directory aborts the run.

#[cfg(feature = "zip")]
mod archive;
mod detect;
mod output;
mod runner;
mod scan;

#[cfg(feature = "zip")]
pub use archive::{ArchiveMember, read_xml_members};
pub use detect::{detect_from_file_name, detect_from_root, identify};
pub use output::{LINES_STEM, PAYMENTS_STEM, ReportWriter, STATS_STEM};
pub use runner::{Converter, FileFailure, RunReport, format_stamp};
pub use scan::{InputKind, input_kind, scan_inputs, source_name};

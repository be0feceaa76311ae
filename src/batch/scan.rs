use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ConvertConfig;
use crate::core::ConvertError;

/// What a scanned path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Xml,
    Zip,
}

/// Classify a path by its extension, case-insensitively.
pub fn input_kind(path: &Path) -> Option<InputKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xml" => Some(InputKind::Xml),
        "zip" => Some(InputKind::Zip),
        _ => None,
    }
}

/// List the inputs under `root`, sorted by file name within each directory.
///
/// Unreadable entries are logged and skipped. ZIP archives are listed only
/// when `include_zip_archives` is set and the `zip` feature is compiled in.
pub fn scan_inputs(root: &Path, config: &ConvertConfig) -> Result<Vec<PathBuf>, ConvertError> {
    if !root.is_dir() {
        return Err(ConvertError::InputDirectory(root.to_path_buf()));
    }

    let include_zip = config.include_zip_archives && cfg!(feature = "zip");
    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    if !config.recursive {
        walker = walker.max_depth(1);
    }

    let mut inputs = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match input_kind(entry.path()) {
            Some(InputKind::Xml) => inputs.push(entry.into_path()),
            Some(InputKind::Zip) if include_zip => inputs.push(entry.into_path()),
            _ => debug!(path = %entry.path().display(), "ignoring file"),
        }
    }
    Ok(inputs)
}

/// Name of `path` relative to `root`, with `/` separators.
pub fn source_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"<x/>").unwrap();
    }

    #[test]
    fn collects_xml_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.xml");
        touch(dir.path(), "A.XML");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "sub/c.xml");

        let config = ConvertConfig::default();
        let found: Vec<String> = scan_inputs(dir.path(), &config)
            .unwrap()
            .iter()
            .map(|p| source_name(dir.path(), p))
            .collect();
        assert_eq!(found, vec!["A.XML", "b.xml", "sub/c.xml"]);
    }

    #[test]
    fn non_recursive_stays_at_top_level() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.xml");
        touch(dir.path(), "sub/c.xml");

        let config = ConvertConfig {
            recursive: false,
            ..Default::default()
        };
        let found = scan_inputs(dir.path(), &config).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn zip_inclusion_follows_config() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lote.zip");

        let off = ConvertConfig {
            include_zip_archives: false,
            ..Default::default()
        };
        assert!(scan_inputs(dir.path(), &off).unwrap().is_empty());

        let on = ConvertConfig {
            include_zip_archives: true,
            ..Default::default()
        };
        let expected = if cfg!(feature = "zip") { 1 } else { 0 };
        assert_eq!(scan_inputs(dir.path(), &on).unwrap().len(), expected);
    }

    #[test]
    fn missing_root_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_inputs(&missing, &ConvertConfig::default()),
            Err(ConvertError::InputDirectory(_))
        ));
    }
}

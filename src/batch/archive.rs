use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::core::ConvertError;

/// One XML member of a ZIP archive.
#[derive(Debug)]
pub struct ArchiveMember {
    pub name: String,
    /// Raw bytes, or the error reading this member.
    pub content: Result<Vec<u8>, ConvertError>,
}

/// Read every `*.xml` member of the archive at `path`, sorted by member name.
///
/// Fails only when the archive itself cannot be opened; a member that
/// cannot be decompressed carries its own error.
pub fn read_xml_members(path: &Path) -> Result<Vec<ArchiveMember>, ConvertError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| ConvertError::Archive(format!("{}: {e}", path.display())))?;

    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| !name.ends_with('/') && name.to_ascii_lowercase().ends_with(".xml"))
        .map(str::to_string)
        .collect();
    names.sort();

    let members = names
        .into_iter()
        .map(|name| {
            let content = read_member(&mut archive, &name);
            ArchiveMember { name, content }
        })
        .collect();
    Ok(members)
}

fn read_member(archive: &mut ZipArchive<File>, name: &str) -> Result<Vec<u8>, ConvertError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ConvertError::Archive(format!("member {name}: {e}")))?;
    let mut buf = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
    entry.read_to_end(&mut buf)?;
    Ok(buf)
}

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use mri_core::{CandidateFile, MAX_FILE_BYTES};

use crate::preview::PreviewError;

/// Reads a file from disk into a [`CandidateFile`].
///
/// The media type is what the host would declare: it comes from the
/// extension, not from the content. Validation happens later in the core.
///
/// At most one byte past the size limit is read, which is enough for the
/// validator to reject the file without buffering all of it.
pub fn load_candidate(path: &Path) -> Result<CandidateFile, PreviewError> {
    let bytes = read_capped(path, MAX_FILE_BYTES + 1).map_err(|source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let media_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(CandidateFile::new(name, media_type, bytes))
}

fn read_capped(path: &Path, limit: u64) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    File::open(path)?.take(limit).read_to_end(&mut bytes)?;
    Ok(bytes)
}

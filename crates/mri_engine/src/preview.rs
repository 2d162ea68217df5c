use std::io;
use std::path::PathBuf;

use base64::Engine;
use mri_core::{CandidateFile, PreviewArtifact};
use mri_logging::mri_debug;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("bytes do not decode as {media_type}")]
    Undecodable { media_type: String },
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preview worker failed: {0}")]
    Worker(String),
}

/// Detects the image format from its leading bytes.
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(PNG_SIGNATURE) {
        Some("image/png")
    } else if bytes.starts_with(JPEG_SIGNATURE) {
        Some("image/jpeg")
    } else {
        None
    }
}

/// Encodes an accepted file as a `data:` URI.
///
/// The URI carries the type the bytes sniff as, so a PNG saved under a `.jpg`
/// name still previews. Bytes that are neither PNG nor JPEG fail.
pub fn encode_preview(file: &CandidateFile) -> Result<PreviewArtifact, PreviewError> {
    let Some(sniffed) = sniff_image_type(file.bytes()) else {
        return Err(PreviewError::Undecodable {
            media_type: file.media_type().to_string(),
        });
    };
    if !file.media_type().to_ascii_lowercase().starts_with(sniffed) {
        mri_debug!(
            "{} declared {} but holds {}; previewing as {}",
            file.name(),
            file.media_type(),
            sniffed,
            sniffed
        );
    }
    let encoded = base64::engine::general_purpose::STANDARD.encode(file.bytes());
    Ok(PreviewArtifact::new(format!("data:{sniffed};base64,{encoded}")))
}

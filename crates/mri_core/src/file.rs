use bytes::Bytes;

/// Identity of an accepted selection. In-flight work is tagged with it.
pub type FileId = u64;

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// A user-supplied image that has not been validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    media_type: String,
    bytes: Bytes,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type, as reported by the host (not sniffed).
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// Display-ready encoding of an accepted file (a `data:` URI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewArtifact(String);

impl PreviewArtifact {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

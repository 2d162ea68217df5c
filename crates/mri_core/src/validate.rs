use thiserror::Error;

use crate::file::{CandidateFile, ACCEPTED_MEDIA_TYPES, MAX_FILE_BYTES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size must be less than 5MB")]
    Oversize { size: u64, max: u64 },
    #[error("Please upload a JPEG or PNG image")]
    UnsupportedMediaType { media_type: String },
}

/// Checks size first, then media type. Pure.
pub fn validate(file: &CandidateFile) -> Result<(), ValidationError> {
    let size = file.size();
    if size > MAX_FILE_BYTES {
        return Err(ValidationError::Oversize {
            size,
            max: MAX_FILE_BYTES,
        });
    }

    let essence = file
        .media_type()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();
    if !ACCEPTED_MEDIA_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(essence))
    {
        return Err(ValidationError::UnsupportedMediaType {
            media_type: file.media_type().to_string(),
        });
    }

    Ok(())
}

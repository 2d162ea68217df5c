use std::fmt;
use std::path::PathBuf;

use mri_core::{ClassificationResult, FileId, PreviewArtifact};

use crate::classify::HealthStatus;
use crate::preview::PreviewError;

#[derive(Debug)]
pub enum EngineEvent {
    PreviewCompleted {
        file_id: FileId,
        result: Result<PreviewArtifact, PreviewError>,
    },
    ClassificationCompleted {
        file_id: FileId,
        result: Result<ClassificationResult, ClassifyError>,
    },
    ReportCompleted {
        file_id: FileId,
        result: Result<PathBuf, String>,
    },
    HealthCompleted {
        result: Result<HealthStatus, ClassifyError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClassifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClassifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    /// The upload itself could not be built, e.g. an unparseable media type.
    InvalidRequest,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "request timed out"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build inference client: {0}")]
    Client(#[from] ClassifyError),
}

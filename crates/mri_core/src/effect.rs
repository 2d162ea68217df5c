use crate::{CandidateFile, ClassificationResult, FileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Encode the accepted file for display.
    MaterializePreview { file_id: FileId, file: CandidateFile },
    /// Post the file to the inference endpoint. Emitted once per analyze/retry.
    SubmitForAnalysis { file_id: FileId, file: CandidateFile },
    /// Write a plain-text report of a finished analysis.
    ExportReport {
        file_id: FileId,
        file: CandidateFile,
        result: ClassificationResult,
    },
}

impl Effect {
    pub fn file_id(&self) -> FileId {
        match self {
            Effect::MaterializePreview { file_id, .. }
            | Effect::SubmitForAnalysis { file_id, .. }
            | Effect::ExportReport { file_id, .. } => *file_id,
        }
    }
}

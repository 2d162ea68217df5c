use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped a file. `None` means the picker was cancelled.
    FileSelected(Option<crate::CandidateFile>),
    /// Host could not read the file the user picked.
    FileUnreadable { name: String, detail: String },
    /// Engine finished encoding the preview for `file_id`.
    PreviewReady {
        file_id: crate::FileId,
        result: Result<crate::PreviewArtifact, String>,
    },
    /// User clicked Analyze.
    AnalyzeClicked,
    /// User clicked Retry after a failed analysis.
    RetryClicked,
    /// Engine completion for an analysis request.
    AnalysisDone {
        file_id: crate::FileId,
        result: Result<crate::ClassificationResult, String>,
    },
    /// User clicked Reset / Upload New Image / Analyze Another Image.
    ResetClicked,
    /// User asked for a downloadable report of the current result.
    ExportClicked,
    /// Engine finished writing the report.
    ExportDone {
        file_id: crate::FileId,
        result: Result<PathBuf, String>,
    },
    /// User dismissed the validation/preview message shown while idle.
    DismissError,
}

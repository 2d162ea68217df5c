use std::path::PathBuf;

use crate::view_model::{Action, AppViewModel, ResultView};
use crate::{CandidateFile, ClassificationResult, FileId, PreviewArtifact};

pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed, please try again";
pub const PREVIEW_FAILED_MESSAGE: &str = "Could not read the selected image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Previewing,
    Analyzing,
    Result,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    id: FileId,
    file: CandidateFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    last_file_id: FileId,
    selection: Option<Selection>,
    preview: Option<PreviewArtifact>,
    result: Option<ClassificationResult>,
    error: Option<String>,
    status_note: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_file_id(&self) -> Option<FileId> {
        self.selection.as_ref().map(|selection| selection.id)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            file_name: self.selection.as_ref().map(|s| s.file.name().to_string()),
            file_size: self.selection.as_ref().map(|s| s.file.size()),
            preview: self.preview.clone(),
            preview_pending: self.is_preview_pending(),
            result: self.result.map(ResultView::from),
            error: self.error.clone(),
            status_note: self.status_note.clone(),
            actions: self.available_actions(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a visible change happened since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn available_actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::Select];
        match self.phase {
            Phase::Idle => {
                if self.error.is_some() {
                    actions.push(Action::Dismiss);
                }
            }
            Phase::Previewing => actions.extend([Action::Analyze, Action::Reset]),
            Phase::Analyzing => actions.push(Action::Reset),
            Phase::Result => actions.extend([Action::Export, Action::Reset]),
            Phase::Error => actions.extend([Action::Retry, Action::Reset]),
        }
        actions
    }

    pub(crate) fn is_preview_pending(&self) -> bool {
        self.phase == Phase::Idle && self.selection.is_some() && self.preview.is_none()
    }

    pub(crate) fn is_current(&self, file_id: FileId) -> bool {
        self.current_file_id() == Some(file_id)
    }

    pub(crate) fn current_file(&self) -> Option<(FileId, &CandidateFile)> {
        self.selection
            .as_ref()
            .map(|selection| (selection.id, &selection.file))
    }

    pub(crate) fn result(&self) -> Option<ClassificationResult> {
        self.result
    }

    /// Drops every per-file artifact and returns to Idle. Returns whether
    /// anything was actually cleared.
    pub(crate) fn clear(&mut self) -> bool {
        let changed = self.phase != Phase::Idle
            || self.selection.is_some()
            || self.preview.is_some()
            || self.result.is_some()
            || self.error.is_some()
            || self.status_note.is_some();
        self.phase = Phase::Idle;
        self.selection = None;
        self.preview = None;
        self.result = None;
        self.error = None;
        self.status_note = None;
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Records an accepted file under a fresh id. Any previous id becomes stale.
    pub(crate) fn select(&mut self, file: CandidateFile) -> FileId {
        self.clear();
        self.last_file_id += 1;
        let id = self.last_file_id;
        self.selection = Some(Selection { id, file });
        self.dirty = true;
        id
    }

    pub(crate) fn show_preview(&mut self, artifact: PreviewArtifact) {
        self.preview = Some(artifact);
        self.phase = Phase::Previewing;
        self.dirty = true;
    }

    pub(crate) fn begin_analysis(&mut self) {
        self.phase = Phase::Analyzing;
        self.error = None;
        self.result = None;
        self.status_note = None;
        self.dirty = true;
    }

    pub(crate) fn show_result(&mut self, result: ClassificationResult) {
        self.phase = Phase::Result;
        self.result = Some(result);
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn show_failure(&mut self, message: impl Into<String>) {
        self.phase = Phase::Error;
        self.result = None;
        self.error = Some(message.into());
        self.dirty = true;
    }

    /// Error message attached to Idle (validation or preview failure).
    pub(crate) fn set_idle_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.dirty = true;
    }

    pub(crate) fn dismiss_error(&mut self) -> bool {
        if self.phase == Phase::Idle && self.error.take().is_some() {
            self.dirty = true;
            return true;
        }
        false
    }

    pub(crate) fn set_status_note(&mut self, note: impl Into<String>) {
        self.status_note = Some(note.into());
        self.dirty = true;
    }

    pub(crate) fn note_export(&mut self, result: &Result<PathBuf, String>) {
        match result {
            Ok(path) => self.set_status_note(format!("Report saved to {}", path.display())),
            Err(_) => self.set_status_note("Could not save the report"),
        }
    }
}

use mri_logging::{mri_debug, mri_info, mri_warn};

use crate::state::{ANALYSIS_FAILED_MESSAGE, PREVIEW_FAILED_MESSAGE};
use crate::{validate, AppState, Effect, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(None) => Vec::new(),
        Msg::FileSelected(Some(file)) => {
            // A new selection always supersedes the current one, valid or not.
            state.clear();
            match validate(&file) {
                Ok(()) => {
                    let file_id = state.select(file.clone());
                    mri_debug!(
                        "Accepted file_id={} name={} size={}",
                        file_id,
                        file.name(),
                        file.size()
                    );
                    vec![Effect::MaterializePreview { file_id, file }]
                }
                Err(err) => {
                    mri_info!("Rejected {}: {:?}", file.name(), err);
                    state.set_idle_error(err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::FileUnreadable { name, detail } => {
            mri_warn!("Could not read {}: {}", name, detail);
            state.clear();
            state.set_idle_error(PREVIEW_FAILED_MESSAGE);
            Vec::new()
        }
        Msg::PreviewReady { file_id, result } => {
            if !state.is_current(file_id) || !state.is_preview_pending() {
                mri_debug!("Discarding stale preview for file_id={}", file_id);
                return (state, Vec::new());
            }
            match result {
                Ok(artifact) => state.show_preview(artifact),
                Err(detail) => {
                    mri_warn!("Preview failed for file_id={}: {}", file_id, detail);
                    state.clear();
                    state.set_idle_error(PREVIEW_FAILED_MESSAGE);
                }
            }
            Vec::new()
        }
        Msg::AnalyzeClicked => match state.phase() {
            Phase::Previewing | Phase::Error => start_analysis(&mut state),
            _ => Vec::new(),
        },
        Msg::RetryClicked => match state.phase() {
            Phase::Error => start_analysis(&mut state),
            _ => Vec::new(),
        },
        Msg::AnalysisDone { file_id, result } => {
            if state.phase() != Phase::Analyzing || !state.is_current(file_id) {
                mri_debug!("Discarding stale analysis for file_id={}", file_id);
                return (state, Vec::new());
            }
            match result {
                Ok(result) => {
                    mri_info!(
                        "Analysis file_id={} detected={} type={:?} confidence={}",
                        file_id,
                        result.detected(),
                        result.tumor_type(),
                        result.confidence()
                    );
                    state.show_result(result);
                }
                Err(detail) => {
                    mri_warn!("Analysis failed for file_id={}: {}", file_id, detail);
                    state.show_failure(ANALYSIS_FAILED_MESSAGE);
                }
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if state.clear() {
                mri_debug!("Reset to idle");
            }
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.phase() != Phase::Result {
                return (state, Vec::new());
            }
            match (state.current_file(), state.result()) {
                (Some((file_id, file)), Some(result)) => vec![Effect::ExportReport {
                    file_id,
                    file: file.clone(),
                    result,
                }],
                _ => Vec::new(),
            }
        }
        Msg::ExportDone { file_id, result } => {
            if state.phase() == Phase::Result && state.is_current(file_id) {
                if let Err(detail) = &result {
                    mri_warn!("Report export failed for file_id={}: {}", file_id, detail);
                }
                state.note_export(&result);
            }
            Vec::new()
        }
        Msg::DismissError => {
            state.dismiss_error();
            Vec::new()
        }
    };

    (state, effects)
}

fn start_analysis(state: &mut AppState) -> Vec<Effect> {
    let Some((file_id, file)) = state.current_file().map(|(id, file)| (id, file.clone())) else {
        return Vec::new();
    };
    state.begin_analysis();
    mri_info!("SubmitForAnalysis file_id={}", file_id);
    vec![Effect::SubmitForAnalysis { file_id, file }]
}

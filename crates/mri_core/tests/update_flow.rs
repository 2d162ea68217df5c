use std::path::PathBuf;
use std::sync::Once;

use mri_core::{
    update, Action, AppState, CandidateFile, ClassificationResult, Effect, FileId, Msg, Phase,
    PreviewArtifact, TumorType, ANALYSIS_FAILED_MESSAGE, MAX_FILE_BYTES, PREVIEW_FAILED_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(mri_logging::initialize_for_tests);
}

fn png(size: usize) -> CandidateFile {
    CandidateFile::new("scan.png", "image/png", vec![0x89u8; size])
}

fn select(state: AppState, file: CandidateFile) -> (AppState, Vec<Effect>) {
    update(state, Msg::FileSelected(Some(file)))
}

fn preview_id(effects: &[Effect]) -> FileId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::MaterializePreview { file_id, .. } => Some(*file_id),
            _ => None,
        })
        .expect("materialize effect")
}

fn previewing(file: CandidateFile) -> (AppState, FileId) {
    let (state, effects) = select(AppState::new(), file);
    let file_id = preview_id(&effects);
    let (state, _) = update(
        state,
        Msg::PreviewReady {
            file_id,
            result: Ok(PreviewArtifact::new("data:image/png;base64,iVBO")),
        },
    );
    (state, file_id)
}

#[test]
fn accepted_file_requests_preview_then_previews_once() {
    init_logging();
    let file = png(2 * 1024 * 1024);
    let (mut state, effects) = select(AppState::new(), file.clone());

    assert_eq!(
        effects,
        vec![Effect::MaterializePreview {
            file_id: 1,
            file: file.clone(),
        }]
    );
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.view().preview_pending);
    assert!(state.consume_dirty());

    let artifact = PreviewArtifact::new("data:image/png;base64,AAAA");
    let (mut state, effects) = update(
        state,
        Msg::PreviewReady {
            file_id: 1,
            result: Ok(artifact.clone()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Previewing);
    let view = state.view();
    assert_eq!(view.preview, Some(artifact.clone()));
    assert!(!view.preview_pending);
    assert_eq!(view.file_name.as_deref(), Some("scan.png"));
    assert_eq!(view.file_size, Some(2 * 1024 * 1024));
    assert!(view.allows(Action::Analyze));
    assert!(state.consume_dirty());

    // A duplicate completion for the same file does not re-enter Previewing.
    let (mut state, _) = update(
        state,
        Msg::PreviewReady {
            file_id: 1,
            result: Ok(PreviewArtifact::new("data:image/png;base64,BBBB")),
        },
    );
    assert_eq!(state.view().preview, Some(artifact));
    assert!(!state.consume_dirty());
}

#[test]
fn oversize_jpeg_is_rejected_without_effects() {
    init_logging();
    let file = CandidateFile::new("big.jpg", "image/jpeg", vec![0xFFu8; 6 * 1024 * 1024]);
    let (state, effects) = select(AppState::new(), file);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.error.as_deref(), Some("File size must be less than 5MB"));
    assert_eq!(view.file_name, None);
    assert!(view.allows(Action::Dismiss));
}

#[test]
fn unsupported_type_is_rejected() {
    init_logging();
    let file = CandidateFile::new("scan.gif", "image/gif", vec![0u8; 128]);
    let (state, effects) = select(AppState::new(), file);

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(
        state.view().error.as_deref(),
        Some("Please upload a JPEG or PNG image")
    );
}

#[test]
fn limit_is_inclusive() {
    init_logging();
    let (state, effects) = select(AppState::new(), png(MAX_FILE_BYTES as usize));
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().error, None);
}

#[test]
fn dismiss_clears_idle_error() {
    init_logging();
    let file = CandidateFile::new("scan.bmp", "image/bmp", vec![0u8; 4]);
    let (mut state, _) = select(AppState::new(), file);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::DismissError);
    assert!(effects.is_empty());
    assert_eq!(state.view().error, None);
    assert!(state.consume_dirty());
}

#[test]
fn preview_failure_stays_idle_with_message() {
    init_logging();
    let (state, effects) = select(AppState::new(), png(64));
    let file_id = preview_id(&effects);

    let (state, effects) = update(
        state,
        Msg::PreviewReady {
            file_id,
            result: Err("signature mismatch".to_string()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.error.as_deref(), Some(PREVIEW_FAILED_MESSAGE));
    assert_eq!(view.file_name, None);
    assert!(!view.preview_pending);
}

#[test]
fn unreadable_file_reports_preview_message() {
    init_logging();
    let (state, _) = previewing(png(64));
    let (state, effects) = update(
        state,
        Msg::FileUnreadable {
            name: "missing.png".to_string(),
            detail: "No such file or directory".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.view().preview, None);
    assert_eq!(state.view().error.as_deref(), Some(PREVIEW_FAILED_MESSAGE));
}

#[test]
fn analyze_then_result_shows_glioma() {
    init_logging();
    let file = png(2 * 1024 * 1024);
    let (state, file_id) = previewing(file.clone());

    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert_eq!(effects, vec![Effect::SubmitForAnalysis { file_id, file }]);
    assert_eq!(state.phase(), Phase::Analyzing);
    assert!(!state.view().allows(Action::Analyze));

    // Analyze is not exposed while a request is in flight.
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Analyzing);

    let (state, effects) = update(
        state,
        Msg::AnalysisDone {
            file_id,
            result: Ok(ClassificationResult::tumor(TumorType::Glioma, 91)),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Result);
    let result = view.result.expect("result view");
    assert_eq!(result.tumor_type.map(|t| t.to_string()).as_deref(), Some("Glioma"));
    assert_eq!(result.confidence_label, "91%");
    assert_eq!(result.headline, "Tumor Detected");
    assert_eq!(view.error, None);
    assert!(view.preview.is_some());
}

#[test]
fn failed_analysis_allows_retry_without_reselection() {
    init_logging();
    let file = png(1024);
    let (state, file_id) = previewing(file.clone());
    let (state, _) = update(state, Msg::AnalyzeClicked);

    let (state, effects) = update(
        state,
        Msg::AnalysisDone {
            file_id,
            result: Err("http status 500".to_string()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Error);
    assert_eq!(view.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
    assert!(view.preview.is_some());
    assert!(view.allows(Action::Retry));
    assert_eq!(view.result, None);

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(effects, vec![Effect::SubmitForAnalysis { file_id, file }]);
    assert_eq!(state.phase(), Phase::Analyzing);
    assert_eq!(state.view().error, None);

    let (state, _) = update(
        state,
        Msg::AnalysisDone {
            file_id,
            result: Ok(ClassificationResult::no_tumor(97)),
        },
    );
    let result = state.view().result.expect("result view");
    assert!(!result.detected);
    assert_eq!(result.headline, "No Tumor Detected");
}

#[test]
fn retry_is_ignored_outside_error() {
    init_logging();
    let (state, _) = previewing(png(16));
    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Previewing);
}

#[test]
fn reset_is_idempotent_from_every_phase() {
    init_logging();
    let (previewing_state, file_id) = previewing(png(32));
    let (analyzing_state, _) = update(previewing_state.clone(), Msg::AnalyzeClicked);
    let (result_state, _) = update(
        analyzing_state.clone(),
        Msg::AnalysisDone {
            file_id,
            result: Ok(ClassificationResult::tumor(TumorType::Pituitary, 80)),
        },
    );
    let (error_state, _) = update(
        analyzing_state.clone(),
        Msg::AnalysisDone {
            file_id,
            result: Err("timeout".to_string()),
        },
    );
    let (idle_with_error, _) = select(
        AppState::new(),
        CandidateFile::new("a.tiff", "image/tiff", vec![1u8]),
    );

    for state in [
        AppState::new(),
        idle_with_error,
        previewing_state,
        analyzing_state,
        result_state,
        error_state,
    ] {
        let (once, effects) = update(state, Msg::ResetClicked);
        assert!(effects.is_empty());
        let (twice, _) = update(once.clone(), Msg::ResetClicked);
        for reset in [&once, &twice] {
            let view = reset.view();
            assert_eq!(view.phase, Phase::Idle);
            assert_eq!(view.preview, None);
            assert_eq!(view.result, None);
            assert_eq!(view.error, None);
            assert_eq!(view.file_name, None);
            assert_eq!(reset.current_file_id(), None);
        }
    }
}

#[test]
fn export_is_only_offered_for_results() {
    init_logging();
    let file = png(32);
    let (state, file_id) = previewing(file.clone());
    let (state, effects) = update(state, Msg::ExportClicked);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::AnalyzeClicked);
    let result = ClassificationResult::tumor(TumorType::Meningioma, 88);
    let (state, _) = update(
        state,
        Msg::AnalysisDone {
            file_id,
            result: Ok(result),
        },
    );
    let (state, effects) = update(state, Msg::ExportClicked);
    assert_eq!(
        effects,
        vec![Effect::ExportReport {
            file_id,
            file,
            result,
        }]
    );

    let (state, _) = update(
        state,
        Msg::ExportDone {
            file_id,
            result: Ok(PathBuf::from("reports/mri-analysis-scan--abcd1234.txt")),
        },
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Result);
    assert_eq!(
        view.status_note.as_deref(),
        Some("Report saved to reports/mri-analysis-scan--abcd1234.txt")
    );
}

use crate::{ClassificationResult, Phase, PreviewArtifact, TumorType};

pub const MEDICAL_DISCLAIMER: &str = "Important: This analysis is for informational purposes only \
and should not be used as a substitute for professional medical advice. Please consult with a \
qualified healthcare provider for proper diagnosis and treatment.";

/// User actions the current phase permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select,
    Analyze,
    Retry,
    Reset,
    Export,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub preview: Option<PreviewArtifact>,
    pub preview_pending: bool,
    pub result: Option<ResultView>,
    pub error: Option<String>,
    pub status_note: Option<String>,
    pub actions: Vec<Action>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub detected: bool,
    pub tumor_type: Option<TumorType>,
    pub confidence: u8,
    pub headline: String,
    pub summary: String,
    pub confidence_label: String,
}

impl From<ClassificationResult> for ResultView {
    fn from(result: ClassificationResult) -> Self {
        let (headline, summary) = match result.tumor_type() {
            Some(kind) => (
                "Tumor Detected".to_string(),
                format!(
                    "A {kind} tumor has been identified. Please consult with a medical \
                     professional for further evaluation."
                ),
            ),
            None => (
                "No Tumor Detected".to_string(),
                "The analysis indicates no tumor is present in the scan.".to_string(),
            ),
        };
        Self {
            detected: result.detected(),
            tumor_type: result.tumor_type(),
            confidence: result.confidence(),
            headline,
            summary,
            confidence_label: format!("{}%", result.confidence()),
        }
    }
}

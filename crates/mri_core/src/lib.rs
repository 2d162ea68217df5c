//! MRI scan core: pure interaction state machine, validation and domain types.
mod effect;
mod file;
mod msg;
mod prediction;
mod state;
mod theme;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use file::{CandidateFile, FileId, PreviewArtifact, ACCEPTED_MEDIA_TYPES, MAX_FILE_BYTES};
pub use msg::Msg;
pub use prediction::{
    normalize_prediction, ClassificationResult, ConfidenceScale, NormalizeError, TumorType,
};
pub use state::{AppState, Phase, ANALYSIS_FAILED_MESSAGE, PREVIEW_FAILED_MESSAGE};
pub use theme::{SubscriptionId, Theme, ThemeStore};
pub use update::update;
pub use validate::{validate, ValidationError};
pub use view_model::{Action, AppViewModel, ResultView, MEDICAL_DISCLAIMER};

//! MRI scan engine: IO side of the upload-and-classify flow and effect execution.
mod classify;
mod engine;
mod persist;
mod preview;
mod report;
mod source;
mod types;

pub use classify::{
    derive_health_url, Classifier, ClassifierSettings, HealthStatus, PredictResponse,
    ReqwestClassifier, IMAGE_FIELD,
};
pub use engine::{EngineConfig, EngineEvents, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use preview::{encode_preview, sniff_image_type, PreviewError};
pub use report::{render_report, report_filename, write_report};
pub use source::load_candidate;
pub use types::{ClassifyError, EngineError, EngineEvent, FailureKind};

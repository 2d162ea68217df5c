use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use mri_core::{CandidateFile, ClassificationResult, FileId};
use mri_logging::{mri_debug, mri_warn};

use crate::classify::{Classifier, ClassifierSettings, ReqwestClassifier};
use crate::preview::{encode_preview, PreviewError};
use crate::report::write_report;
use crate::{EngineError, EngineEvent};

pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub classifier: ClassifierSettings,
    pub report_dir: PathBuf,
    /// Timestamp source for reports; the app injects a UTC clock.
    pub generated_utc: Clock,
}

impl EngineConfig {
    pub fn default_with_report_dir(report_dir: PathBuf) -> Self {
        Self {
            classifier: ClassifierSettings::default(),
            report_dir,
            generated_utc: Arc::new(|| "unknown".to_string()),
        }
    }
}

enum EngineCommand {
    Preview {
        file_id: FileId,
        file: CandidateFile,
    },
    Classify {
        file_id: FileId,
        file: CandidateFile,
    },
    Export {
        file_id: FileId,
        file: CandidateFile,
        result: ClassificationResult,
    },
    Health,
}

/// Receiving half of the engine: completion events in arrival order.
pub struct EngineEvents {
    rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    pub fn recv(&self) -> Option<EngineEvent> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Sending half of the engine. Each command runs as its own task on a
/// worker thread that owns the tokio runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<(Self, EngineEvents), EngineError> {
        let classifier = Arc::new(ReqwestClassifier::new(config.classifier.clone())?);
        Self::with_classifier(config, classifier)
    }

    /// Like [`EngineHandle::new`] with a caller-provided classifier.
    pub fn with_classifier(
        config: EngineConfig,
        classifier: Arc<dyn Classifier>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let config = Arc::new(config);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let classifier = classifier.clone();
                let config = config.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(classifier.as_ref(), &config, command).await;
                    if event_tx.send(event).is_err() {
                        mri_debug!("Engine event dropped; receiver is gone");
                    }
                });
            }
            mri_debug!("Engine command channel closed; worker exiting");
        });

        Ok((Self { cmd_tx }, EngineEvents { rx: event_rx }))
    }

    pub fn preview(&self, file_id: FileId, file: CandidateFile) {
        self.send(EngineCommand::Preview { file_id, file });
    }

    pub fn classify(&self, file_id: FileId, file: CandidateFile) {
        self.send(EngineCommand::Classify { file_id, file });
    }

    pub fn export(&self, file_id: FileId, file: CandidateFile, result: ClassificationResult) {
        self.send(EngineCommand::Export {
            file_id,
            file,
            result,
        });
    }

    pub fn health(&self) {
        self.send(EngineCommand::Health);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            mri_warn!("Engine worker is not running; command dropped");
        }
    }
}

async fn handle_command(
    classifier: &dyn Classifier,
    config: &EngineConfig,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Preview { file_id, file } => {
            let result = tokio::task::spawn_blocking(move || encode_preview(&file))
                .await
                .unwrap_or_else(|err| Err(PreviewError::Worker(err.to_string())));
            EngineEvent::PreviewCompleted { file_id, result }
        }
        EngineCommand::Classify { file_id, file } => {
            let result = classifier.classify(file_id, &file).await;
            EngineEvent::ClassificationCompleted { file_id, result }
        }
        EngineCommand::Export {
            file_id,
            file,
            result,
        } => {
            let dir = config.report_dir.clone();
            let stamp = (config.generated_utc)();
            let written =
                tokio::task::spawn_blocking(move || write_report(&dir, &file, &result, &stamp))
                    .await
                    .map_err(|err| err.to_string())
                    .and_then(|res| res.map_err(|err| err.to_string()));
            EngineEvent::ReportCompleted {
                file_id,
                result: written,
            }
        }
        EngineCommand::Health => EngineEvent::HealthCompleted {
            result: classifier.health().await,
        },
    }
}

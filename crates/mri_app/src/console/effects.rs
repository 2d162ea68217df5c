use std::sync::mpsc;
use std::thread;

use mri_core::{Effect, Msg};
use mri_engine::{EngineConfig, EngineError, EngineEvent, EngineEvents, EngineHandle};
use mri_logging::{mri_debug, mri_info, mri_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, event_tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::new(config)?;
        spawn_event_loop(events, event_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::MaterializePreview { file_id, file } => {
                    mri_debug!("MaterializePreview file_id={} name={}", file_id, file.name());
                    self.engine.preview(file_id, file);
                }
                Effect::SubmitForAnalysis { file_id, file } => {
                    mri_info!(
                        "SubmitForAnalysis file_id={} name={} bytes={}",
                        file_id,
                        file.name(),
                        file.size()
                    );
                    self.engine.classify(file_id, file);
                }
                Effect::ExportReport {
                    file_id,
                    file,
                    result,
                } => {
                    mri_info!("ExportReport file_id={} name={}", file_id, file.name());
                    self.engine.export(file_id, file, result);
                }
            }
        }
    }

    pub fn check_health(&self) {
        self.engine.health();
    }
}

fn spawn_event_loop(events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if event_tx.send(translate(event)).is_err() {
                break;
            }
        }
        mri_debug!("Engine event loop finished");
    });
}

/// Engine failures carry detail for the log; the core only sees a short text.
fn translate(event: EngineEvent) -> AppEvent {
    match event {
        EngineEvent::PreviewCompleted { file_id, result } => AppEvent::Msg(Msg::PreviewReady {
            file_id,
            result: result.map_err(|err| {
                mri_warn!("Preview for file {} failed: {}", file_id, err);
                err.to_string()
            }),
        }),
        EngineEvent::ClassificationCompleted { file_id, result } => {
            AppEvent::Msg(Msg::AnalysisDone {
                file_id,
                result: result.map_err(|err| {
                    mri_warn!("Analysis for file {} failed: {}", file_id, err);
                    err.to_string()
                }),
            })
        }
        EngineEvent::ReportCompleted { file_id, result } => {
            if let Err(err) = &result {
                mri_warn!("Report for file {} failed: {}", file_id, err);
            }
            AppEvent::Msg(Msg::ExportDone { file_id, result })
        }
        EngineEvent::HealthCompleted { result } => AppEvent::Health(result),
    }
}

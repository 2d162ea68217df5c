use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Utc;
use mri_core::{update, Action, AppState, AppViewModel, Msg, Theme, ThemeStore};
use mri_engine::{load_candidate, ClassifyError, EngineConfig, HealthStatus};
use mri_logging::{current_interaction, mri_debug, mri_info, next_interaction};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{parse_command, Command, HELP_TEXT};
use super::ui::render::render;
use super::{logging, persistence};

/// Everything the main loop reacts to, funnelled through one channel.
#[derive(Debug)]
pub enum AppEvent {
    Line(String),
    InputClosed,
    Msg(Msg),
    Health(Result<HealthStatus, ClassifyError>),
}

pub fn run_app() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().context("invalid configuration")?;
    logging::initialize(config.log_destination, config.log_level);
    mri_info!(
        "Starting mri_app endpoint={} report_dir={:?} state_dir={:?}",
        config.classifier.endpoint,
        config.report_dir,
        config.state_dir
    );

    let mut themes = ThemeStore::new(persistence::load_theme(&config.state_dir));
    let state_dir = config.state_dir.clone();
    themes.subscribe(move |theme| persistence::save_theme(&state_dir, theme));

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let engine_config = EngineConfig {
        classifier: config.classifier.clone(),
        report_dir: config.report_dir.clone(),
        generated_utc: Arc::new(|| Utc::now().to_rfc3339()),
    };
    let runner = EffectRunner::new(engine_config, event_tx.clone())
        .context("failed to start the analysis engine")?;
    spawn_input_reader(event_tx);

    let mut state = AppState::new();
    print_screen(&state, themes.get());
    println!("Type 'help' for commands.");

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Line(line) => {
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                let seq = next_interaction();
                mri_debug!("Interaction {} command={:?}", seq, command);
                match command {
                    Command::Quit => break,
                    Command::Help => println!("{HELP_TEXT}"),
                    Command::Status => print_screen(&state, themes.get()),
                    Command::Health => {
                        println!("Checking inference service...");
                        runner.check_health();
                    }
                    Command::Theme(choice) => {
                        let changed = match choice {
                            Some(theme) => themes.set(theme),
                            None => {
                                themes.toggle();
                                true
                            }
                        };
                        if changed {
                            print_screen(&state, themes.get());
                        }
                    }
                    other => {
                        if let Some(notice) = unavailable_notice(&other, &state.view()) {
                            println!("{notice}");
                            continue;
                        }
                        if let Some(msg) = command_msg(other) {
                            state = dispatch(state, msg, &runner, themes.get());
                        }
                    }
                }
            }
            AppEvent::Msg(msg) => {
                state = dispatch(state, msg, &runner, themes.get());
            }
            AppEvent::Health(result) => println!("{}", health_line(&result)),
            AppEvent::InputClosed => {
                mri_debug!("Input closed after interaction {}", current_interaction());
                break;
            }
        }
    }

    mri_info!("Shutting down");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner, theme: Theme) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        print_screen(&state, theme);
    }
    state
}

/// Maps the commands that drive the state machine to their messages.
fn command_msg(command: Command) -> Option<Msg> {
    match command {
        Command::Open(path) => Some(open_msg(path)),
        Command::Analyze => Some(Msg::AnalyzeClicked),
        Command::Retry => Some(Msg::RetryClicked),
        Command::Reset => Some(Msg::ResetClicked),
        Command::Export => Some(Msg::ExportClicked),
        Command::Dismiss => Some(Msg::DismissError),
        Command::Theme(_)
        | Command::Health
        | Command::Status
        | Command::Help
        | Command::Quit => None,
    }
}

/// Explains why a state command is ignored in the current phase.
fn unavailable_notice(command: &Command, view: &AppViewModel) -> Option<String> {
    let allowed = match command {
        // Analyze from Error resubmits, same as retry.
        Command::Analyze => view.allows(Action::Analyze) || view.allows(Action::Retry),
        Command::Retry => view.allows(Action::Retry),
        Command::Reset => view.allows(Action::Reset),
        Command::Export => view.allows(Action::Export),
        Command::Dismiss => view.allows(Action::Dismiss),
        _ => true,
    };
    if allowed {
        None
    } else {
        Some(format!("'{}' is not available now", command.name()))
    }
}

fn open_msg(path: Option<PathBuf>) -> Msg {
    let Some(path) = path else {
        return Msg::FileSelected(None);
    };
    match load_candidate(&path) {
        Ok(file) => Msg::FileSelected(Some(file)),
        Err(err) => Msg::FileUnreadable {
            name: display_name(&path),
            detail: err.to_string(),
        },
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn health_line(result: &Result<HealthStatus, ClassifyError>) -> String {
    match result {
        Ok(status) if status.message.is_empty() => {
            format!("Inference service: {}", status.status)
        }
        Ok(status) => format!("Inference service: {} ({})", status.status, status.message),
        Err(err) => format!("Inference service unreachable: {err}"),
    }
}

fn print_screen(state: &AppState, theme: Theme) {
    println!();
    for line in render(&state.view(), theme) {
        println!("{line}");
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

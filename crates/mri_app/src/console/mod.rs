//! Line-driven console front end for the upload-and-classify flow.
mod app;
mod config;
mod effects;
mod logging;
mod persistence;
mod ui;

pub use app::run_app;

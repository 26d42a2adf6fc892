//! TUI module: Terminal User Interface using Ratatui.
//!
//! A four-step wizard:
//! - Personal profile with live BMI
//! - Optional lab values
//! - Symptom description
//! - Analysis results, report export

mod app;
mod form;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use form::Field;
pub use styles::Theme;
pub use worker::{AnalysisProgress, AnalysisWorker, AnalysisWorkerHandle};

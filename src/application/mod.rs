//! Application layer: Use cases and services.
//!
//! This module orchestrates domain types with ports to implement the
//! analysis request/response contract and the report export.

mod analysis;
pub mod prompt;
pub mod report;
pub mod schema;

pub use analysis::{parse_analysis, AnalysisService};
pub use report::{export_report, render_report_html, ReportError};

//! Reports module - weekly aggregation and its two renderings.

pub mod aggregation;
mod pdf_document;
mod report_model;
mod report_renderer;

pub use aggregation::{summarize_week, total, within_week, within_window, WeekSummary, WeekWindow};
pub use pdf_document::ReportDocument;
pub use report_model::{ReportLine, WeeklyReport};
pub use report_renderer::{format_amount, render_view};

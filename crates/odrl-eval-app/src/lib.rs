//! Use case orchestration for odrl-eval.
//!
//! This crate provides the application layer: use cases that coordinate the settings, graph,
//! domain, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod list;
mod render;
mod report;
mod run;

pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use list::{CaseListing, list_cases};
pub use render::{render_case_log, render_markdown, to_renderable_log, to_renderable_summary};
pub use report::{
    case_log_file_name, parse_report_json, report_file_name, serialize_report,
    write_case_outputs, write_report, write_text,
};
pub use run::{RunInput, RunOutput, exit_code, run_cases, trace_digest};

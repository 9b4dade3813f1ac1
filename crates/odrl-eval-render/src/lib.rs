//! Rendering for case results: a Markdown summary table and the plain-text case log.
//!
//! Renderers take the small `Renderable*` models below, never the report DTOs, so their output
//! only changes when these models do.

#![forbid(unsafe_code)]

mod log;
mod markdown;
mod model;

pub use log::render_case_log;
pub use markdown::render_markdown;
pub use model::{RenderableCase, RenderableCaseLog, RenderableCaseStatus, RenderableSummary};

//! Render use cases: map case reports onto the renderer models.

use odrl_eval_render::{RenderableCase, RenderableCaseLog, RenderableCaseStatus, RenderableSummary};
use odrl_eval_types::CaseReport;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn to_renderable_summary(profile: Option<&str>, reports: &[CaseReport]) -> RenderableSummary {
    RenderableSummary {
        profile: profile.map(str::to_string),
        cases: reports.iter().map(renderable_case).collect(),
    }
}

fn renderable_case(report: &CaseReport) -> RenderableCase {
    let status = match &report.expectation {
        None => RenderableCaseStatus::Unchecked,
        Some(e) if e.matched => RenderableCaseStatus::Pass,
        Some(_) => RenderableCaseStatus::Mismatch,
    };
    RenderableCase {
        name: report.case.clone(),
        rule_id: report.rule_id.clone(),
        kind: report.rule_kind.to_string(),
        round: report.round.to_string(),
        verdict: report.verdict.label(),
        expected: report.expectation.as_ref().map(|e| e.expected.clone()),
        status,
    }
}

pub fn to_renderable_log(report: &CaseReport) -> RenderableCaseLog {
    RenderableCaseLog {
        case: report.case.clone(),
        started_at: timestamp(report.started_at),
        finished_at: timestamp(report.finished_at),
        lines: report.trace.iter().map(ToString::to_string).collect(),
    }
}

fn timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}

pub fn render_markdown(profile: Option<&str>, reports: &[CaseReport]) -> String {
    odrl_eval_render::render_markdown(&to_renderable_summary(profile, reports))
}

pub fn render_case_log(report: &CaseReport) -> String {
    odrl_eval_render::render_case_log(&to_renderable_log(report))
}

use crate::RenderableCaseLog;

/// Renders the `CASE_<name>_log.txt` body: every line indented by one space.
pub fn render_case_log(log: &RenderableCaseLog) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        &format!("START with test case: {}  -- on/at {}", log.case, log.started_at),
    );
    for line in &log.lines {
        push_line(&mut out, line);
    }
    push_line(
        &mut out,
        &format!("CLOSING test case: {}  -- on/at {}", log.case, log.finished_at),
    );
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push(' ');
    out.push_str(line);
    out.push('\n');
}

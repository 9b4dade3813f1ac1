#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableCaseStatus {
    /// The verdict matched the case's expectation.
    Pass,
    Mismatch,
    /// The case had no expectation.
    Unchecked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCase {
    pub name: String,
    pub rule_id: String,
    pub kind: String,
    pub round: String,
    pub verdict: String,
    pub expected: Option<String>,
    pub status: RenderableCaseStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableSummary {
    pub profile: Option<String>,
    pub cases: Vec<RenderableCase>,
}

/// One case's trace with the framing timestamps already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCaseLog {
    pub case: String,
    pub started_at: String,
    pub finished_at: String,
    /// `PREFIX: message` lines in trace order.
    pub lines: Vec<String>,
}

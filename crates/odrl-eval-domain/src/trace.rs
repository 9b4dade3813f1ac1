//! Trace sinks. The engine records every decision point; persistence is the caller's job.

use odrl_eval_types::TraceEntry;

pub trait TraceSink {
    fn record(&mut self, entry: TraceEntry);
}

impl TraceSink for Vec<TraceEntry> {
    fn record(&mut self, entry: TraceEntry) {
        self.push(entry);
    }
}

/// Append-only trace owned by one top-level evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered `PREFIX: message` lines.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl TraceSink for Trace {
    fn record(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }
}

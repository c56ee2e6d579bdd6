use crate::aggregate::AggregatedFlow;

/// Counters for one aggregation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Lines or records offered to the aggregator, blank lines included
    pub lines: usize,
    /// Lines holding nothing but whitespace
    pub blank: usize,
    /// Records merged into a flow
    pub merged: usize,
    /// Lines that did not parse as an eve record
    pub malformed: usize,
    /// Records without a usable flow id
    pub missing_flow_id: usize,
    /// Flow events whose start/end could not be turned into a duration
    pub duration_errors: usize,
    /// Distinct flow ids
    pub flows: usize,
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lines ({} blank), {} merged into {} flows, {} malformed, {} without flow id, {} bad durations",
            self.lines,
            self.blank,
            self.merged,
            self.flows,
            self.malformed,
            self.missing_flow_id,
            self.duration_errors
        )
    }
}

/// Resolved output of an aggregation run: header, rows in first-seen order, and counters
#[derive(Clone, Debug)]
pub struct FlowTable {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<AggregatedFlow>,
    pub(crate) stats: Stats,
}

impl FlowTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[AggregatedFlow] {
        &self.rows
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn row(&self, flow_id: &str) -> Option<&AggregatedFlow> {
        self.rows.iter().find(|r| r.flow_id() == flow_id)
    }

    /// Each row rendered in header order
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows
            .iter()
            .map(move |row| self.columns.iter().map(|c| row.render(c)).collect())
    }
}

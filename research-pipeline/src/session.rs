use crate::result_set::ResultSet;
use gummy_core::LinkSummary;
use uuid::Uuid;

/// How many history entries the dashboard offers for re-running.
pub const RECENT_HISTORY: usize = 5;

/// State of one interactive session: what was asked and what is on screen.
///
/// A search replaces the current summary and vice versa, so at most one of
/// them is present at a time.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    history: Vec<String>,
    results: Option<ResultSet>,
    summary: Option<LinkSummary>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            history: Vec::new(),
            results: None,
            summary: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Remembers a query or link. Repeats keep their first position.
    pub fn record(&mut self, entry: &str) {
        let entry = entry.trim();
        if entry.is_empty() || self.history.iter().any(|seen| seen == entry) {
            return;
        }
        self.history.push(entry.to_string());
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The last [`RECENT_HISTORY`] entries, oldest first.
    pub fn recent(&self) -> &[String] {
        let start = self.history.len().saturating_sub(RECENT_HISTORY);
        &self.history[start..]
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn results_mut(&mut self) -> Option<&mut ResultSet> {
        self.results.as_mut()
    }

    pub fn summary(&self) -> Option<&LinkSummary> {
        self.summary.as_ref()
    }

    pub fn set_results(&mut self, results: Option<ResultSet>) {
        self.results = results;
        self.summary = None;
    }

    pub fn set_summary(&mut self, summary: LinkSummary) {
        self.summary = Some(summary);
        self.results = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

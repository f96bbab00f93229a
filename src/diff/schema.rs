//! Schema definitions for diff reports.
//!
//! Defines the structures that represent self-time differences between
//! two sample sets.

use serde::Serialize;

/// One method whose self-time share changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    /// Display name of the method
    pub name: String,

    /// Self-time percentage in the "before" profile (0 when absent)
    pub before: f64,

    /// Self-time percentage in the "after" profile (0 when absent)
    pub after: f64,

    /// `after - before`
    pub delta: f64,
}

/// Classified self-time changes, each bucket already sorted and truncated
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffReport {
    /// Present in both, self share grew by at least the noise floor
    pub regressions: Vec<DiffEntry>,

    /// Present in both, self share shrank by at least the noise floor
    pub improvements: Vec<DiffEntry>,

    /// Only in "after"
    pub new: Vec<DiffEntry>,

    /// Only in "before"
    pub gone: Vec<DiffEntry>,
}

impl DiffReport {
    /// True when every bucket is empty
    pub fn is_unchanged(&self) -> bool {
        self.regressions.is_empty()
            && self.improvements.is_empty()
            && self.new.is_empty()
            && self.gone.is_empty()
    }
}

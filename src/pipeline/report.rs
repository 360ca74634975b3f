//! Run summary.

use std::fmt;

use crate::align::EntityAlignmentCounts;

/// Counters gathered over a corpus run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sentences: usize,
    /// Sentences written as empty lines under `FailurePolicy::Skip`.
    pub skipped: usize,
    pub self_cycles: usize,
    pub reentrancies: usize,
    pub entities: EntityAlignmentCounts,
}

impl RunReport {
    fn ratio(&self, count: usize) -> Option<f64> {
        (self.entities.total > 0).then(|| count as f64 / self.entities.total as f64)
    }

    /// Share of entities realized by exactly one span.
    pub fn single_ratio(&self) -> Option<f64> {
        self.ratio(self.entities.single)
    }

    pub fn multiple_ratio(&self) -> Option<f64> {
        self.ratio(self.entities.multiple)
    }

    pub fn empty_ratio(&self) -> Option<f64> {
        self.ratio(self.entities.empty)
    }
}

fn write_ratio(f: &mut fmt::Formatter<'_>, name: &str, ratio: Option<f64>) -> fmt::Result {
    match ratio {
        Some(r) => writeln!(f, "one to {name} alignment: {r:.6}"),
        None => writeln!(f, "one to {name} alignment: n/a"),
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} sentences ({} skipped, {} with self cycles, {} reentrancies)",
            self.sentences, self.skipped, self.self_cycles, self.reentrancies
        )?;
        write_ratio(f, "one", self.single_ratio())?;
        write_ratio(f, "multiple", self.multiple_ratio())?;
        write_ratio(f, "empty", self.empty_ratio())
    }
}

use std::fmt;
use std::time::Duration;

use crate::algorithms::a_star::SearchOutcome;

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Cells moved into the closed set.
    pub expanded: usize,
    /// Open-set insertions and updates, including the start cell.
    pub generated: usize,
    /// Superseded open-set entries discarded on extraction.
    pub stale: usize,
    /// Largest number of live cells in the open set at once.
    pub peak_open: usize,
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expanded cells: {}", self.expanded)?;
        writeln!(f, "Generated entries: {}", self.generated)?;
        writeln!(f, "Stale entries skipped: {}", self.stale)?;
        writeln!(f, "Peak open set size: {}", self.peak_open)?;
        writeln!(f, "Search time: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Outcome of a search together with its counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

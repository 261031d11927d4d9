use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::algorithms::a_star::{PathFinder, SearchOutcome};
use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::scenario::Scenario;

/// Aggregate results of a batch of random searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub runs: usize,
    pub found: usize,
    pub not_found: usize,
    pub total_steps: usize,
    pub total_cost: f64,
    pub total_expanded: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn mean_steps(&self) -> f64 {
        if self.found > 0 {
            self.total_steps as f64 / self.found as f64
        } else {
            0.0
        }
    }

    pub fn mean_cost(&self) -> f64 {
        if self.found > 0 {
            self.total_cost / self.found as f64
        } else {
            0.0
        }
    }

    pub fn mean_expanded(&self) -> f64 {
        if self.runs > 0 {
            self.total_expanded as f64 / self.runs as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let found_percentage = if self.runs > 0 {
            (self.found as f64 / self.runs as f64) * 100.0
        } else {
            0.0
        };

        writeln!(f, "Runs: {}", self.runs)?;
        writeln!(f, "Paths found: {} ({:.1}%)", self.found, found_percentage)?;
        writeln!(f, "No path: {}", self.not_found)?;
        writeln!(f, "Mean path steps: {:.2}", self.mean_steps())?;
        writeln!(f, "Mean path cost: {:.3}", self.mean_cost())?;
        writeln!(f, "Mean expanded cells: {:.1}", self.mean_expanded())?;
        writeln!(f, "Total time: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Runs one search per seed on freshly generated random scenarios.
pub struct BatchRunner<H> {
    finder: PathFinder<H>,
    height: usize,
    width: usize,
    walls: usize,
}

impl<H: Heuristic> BatchRunner<H> {
    pub fn new(finder: PathFinder<H>, height: usize, width: usize, walls: usize) -> Self {
        BatchRunner {
            finder,
            height,
            width,
            walls,
        }
    }

    /// Runs `runs` searches using seeds `first_seed`, `first_seed + 1`, ...
    pub fn run(&self, runs: usize, first_seed: u64) -> Result<BatchSummary> {
        let started = Instant::now();
        let mut summary = BatchSummary::default();

        for i in 0..runs as u64 {
            let seed = first_seed.wrapping_add(i);
            let scenario = Scenario::random(self.height, self.width, self.walls, seed)?;
            let (Some(start), Some(goal)) = (scenario.start, scenario.goal) else {
                return Err(Error::InvalidGrid(
                    "random scenario is missing an endpoint".to_string(),
                ));
            };

            let report = self.finder.search(&scenario.grid, start, goal)?;
            summary.runs += 1;
            summary.total_expanded += report.stats.expanded;
            match report.outcome {
                SearchOutcome::Found(path) => {
                    summary.found += 1;
                    summary.total_steps += path.steps();
                    summary.total_cost += path.cost();
                }
                SearchOutcome::NotFound => summary.not_found += 1,
            }
            debug!(seed, found = summary.found, runs = summary.runs, "batch run finished");
        }

        summary.elapsed = started.elapsed();
        info!(
            runs = summary.runs,
            found = summary.found,
            elapsed = ?summary.elapsed,
            "batch completed"
        );
        Ok(summary)
    }
}

use std::fmt;
use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::algorithms::open_set::{OpenSet, TieBreak};
use crate::error::{Endpoint, EndpointIssue, Error, Result};
use crate::grid::{Cell, Grid};
use crate::heuristic::{Distance, Heuristic};
use crate::movement::MovementRule;
use crate::statistics::{SearchReport, SearchStats};

/// Cells from start to goal inclusive, with the total movement cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    cells: Vec<Cell>,
    cost: f64,
}

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a path holds at least its start cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// Result of a search that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Path),
    /// The goal is not reachable from the start.
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Best known cost to a cell and how it was reached.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: f64,
    f: f64,
    parent: Option<Cell>,
}

/// A* search configured with a heuristic, movement rule and tie-break
/// policy.
#[derive(Debug, Clone)]
pub struct PathFinder<H = Distance> {
    heuristic: H,
    movement: MovementRule,
    tie_break: TieBreak,
}

impl Default for PathFinder<Distance> {
    fn default() -> Self {
        PathFinder::new(Distance::Manhattan, MovementRule::four_way())
    }
}

impl<H: Heuristic> PathFinder<H> {
    pub fn new(heuristic: H, movement: MovementRule) -> Self {
        PathFinder {
            heuristic,
            movement,
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Finds a minimum-cost path from `start` to `goal` on `grid`.
    pub fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Result<SearchOutcome> {
        self.search(grid, start, goal).map(|report| report.outcome)
    }

    /// Like [`PathFinder::find_path`], also returning search counters.
    pub fn search(&self, grid: &Grid, start: Cell, goal: Cell) -> Result<SearchReport> {
        run(
            grid,
            start,
            goal,
            &self.heuristic,
            &self.movement,
            self.tie_break,
        )
    }
}

/// Finds a minimum-cost path from `start` to `goal` using the default
/// tie-break policy.
///
/// # Errors
///
/// * [`Error::InvalidEndpoint`] if either endpoint is out of bounds or blocked.
/// * [`Error::InvalidConfiguration`] if the heuristic yields a negative or
///   non-finite estimate.
///
/// An unreachable goal is reported as [`SearchOutcome::NotFound`].
///
/// The path is minimal when `heuristic` is consistent under `movement`
/// (see [`Heuristic`]). Every [`Distance`] variant is consistent for the
/// rules it is documented for.
pub fn find_path<H: Heuristic + ?Sized>(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    heuristic: &H,
    movement: &MovementRule,
) -> Result<SearchOutcome> {
    run(grid, start, goal, heuristic, movement, TieBreak::default()).map(|r| r.outcome)
}

fn check_endpoint(grid: &Grid, endpoint: Endpoint, cell: Cell) -> Result<()> {
    let reason = if !grid.in_bounds(cell) {
        EndpointIssue::OutOfBounds {
            height: grid.height(),
            width: grid.width(),
        }
    } else if grid.is_blocked(cell) {
        EndpointIssue::Blocked
    } else {
        return Ok(());
    };

    warn!(%endpoint, %cell, %reason, "rejecting search endpoint");
    Err(Error::InvalidEndpoint {
        endpoint,
        cell,
        reason,
    })
}

fn estimate<H: Heuristic + ?Sized>(heuristic: &H, from: Cell, goal: Cell) -> Result<f64> {
    let h = heuristic.estimate(from, goal);
    if h.is_finite() && h >= 0.0 {
        Ok(h)
    } else {
        Err(Error::InvalidConfiguration(format!(
            "heuristic estimate {} from {} to {} must be finite and non-negative",
            h, from, goal
        )))
    }
}

fn run<H: Heuristic + ?Sized>(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    heuristic: &H,
    movement: &MovementRule,
    tie_break: TieBreak,
) -> Result<SearchReport> {
    check_endpoint(grid, Endpoint::Start, start)?;
    check_endpoint(grid, Endpoint::Goal, goal)?;

    let started = Instant::now();
    let mut stats = SearchStats::default();

    if start == goal {
        stats.elapsed = started.elapsed();
        return Ok(SearchReport {
            outcome: SearchOutcome::Found(Path {
                cells: vec![start],
                cost: 0.0,
            }),
            stats,
        });
    }

    debug!(
        %start,
        %goal,
        height = grid.height(),
        width = grid.width(),
        ?tie_break,
        "starting A* search"
    );

    let mut nodes: FxHashMap<Cell, SearchNode> = FxHashMap::default();
    let mut closed: FxHashSet<Cell> = FxHashSet::default();
    let mut open = OpenSet::new(tie_break);
    let mut neighbors = Vec::with_capacity(movement.steps().len());

    let h = estimate(heuristic, start, goal)?;
    nodes.insert(
        start,
        SearchNode {
            g: 0.0,
            f: h,
            parent: None,
        },
    );
    open.push_or_update(start, 0.0, h);
    stats.generated = 1;
    stats.peak_open = 1;

    let outcome = loop {
        let Some(current) = open.pop_min() else {
            break SearchOutcome::NotFound;
        };

        if current.cell == goal {
            break SearchOutcome::Found(reconstruct_path(&nodes, goal));
        }

        closed.insert(current.cell);
        stats.expanded += 1;
        trace!(cell = %current.cell, g = current.g, f = current.f, "expanding");

        neighbors.clear();
        movement.neighbors(grid, current.cell, &mut neighbors);

        for &(next, cost) in &neighbors {
            if closed.contains(&next) {
                continue;
            }

            let tentative_g = current.g + cost;
            if nodes.get(&next).is_some_and(|known| tentative_g >= known.g) {
                continue;
            }

            let node = SearchNode {
                g: tentative_g,
                f: tentative_g + estimate(heuristic, next, goal)?,
                parent: Some(current.cell),
            };
            nodes.insert(next, node);
            open.push_or_update(next, node.g, node.f);
            stats.generated += 1;
        }

        stats.peak_open = stats.peak_open.max(open.len());
    };

    stats.stale = open.stale_discarded();
    stats.elapsed = started.elapsed();

    match &outcome {
        SearchOutcome::Found(path) => debug!(
            steps = path.steps(),
            cost = path.cost(),
            expanded = stats.expanded,
            "path found"
        ),
        SearchOutcome::NotFound => debug!(expanded = stats.expanded, "goal unreachable"),
    }

    Ok(SearchReport { outcome, stats })
}

/// Walks predecessor links back from `goal`.
fn reconstruct_path(nodes: &FxHashMap<Cell, SearchNode>, goal: Cell) -> Path {
    let cost = nodes.get(&goal).map_or(0.0, |node| node.g);
    let mut cells = Vec::new();
    let mut current = Some(goal);
    while let Some(cell) = current {
        cells.push(cell);
        current = nodes.get(&cell).and_then(|node| node.parent);
    }
    cells.reverse();
    Path { cells, cost }
}

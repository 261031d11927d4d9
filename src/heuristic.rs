use std::f64::consts::SQRT_2;

use crate::grid::Cell;

/// Estimate of the remaining cost from one cell to another.
///
/// Estimates must be finite and non-negative. Closed cells are never
/// reopened, so the returned path is only guaranteed optimal when the
/// estimate is consistent: `h(a) <= cost(a, b) + h(b)` for every legal move
/// `a -> b`, and `h(goal, goal) == 0`. An estimate that never overestimates
/// but is not consistent can yield a longer path than necessary.
pub trait Heuristic {
    fn estimate(&self, from: Cell, to: Cell) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(Cell, Cell) -> f64,
{
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        self(from, to)
    }
}

/// Built-in distance heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distance {
    /// Sum of axis distances. Admissible for four-way unit moves.
    #[default]
    Manhattan,
    /// Straight-line distance.
    Euclidean,
    /// Exact cost on an open eight-way grid with √2 diagonals.
    Octile,
    /// Largest axis distance.
    Chebyshev,
    /// Always zero; the search degrades to Dijkstra.
    Zero,
}

impl Heuristic for Distance {
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        let dr = from.row.abs_diff(to.row) as f64;
        let dc = from.col.abs_diff(to.col) as f64;
        match self {
            Distance::Manhattan => dr + dc,
            Distance::Euclidean => dr.hypot(dc),
            Distance::Octile => dr.max(dc) + (SQRT_2 - 1.0) * dr.min(dc),
            Distance::Chebyshev => dr.max(dc),
            Distance::Zero => 0.0,
        }
    }
}

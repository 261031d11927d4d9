use std::f64::consts::SQRT_2;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};

/// One neighbor offset and the cost of taking it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub dr: isize,
    pub dc: isize,
    pub cost: f64,
}

impl Step {
    pub const fn new(dr: isize, dc: isize, cost: f64) -> Self {
        Step { dr, dc, cost }
    }

    fn is_unit_diagonal(&self) -> bool {
        self.dr.unsigned_abs() == 1 && self.dc.unsigned_abs() == 1
    }
}

/// How a unit diagonal step treats the two orthogonal cells it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerCutting {
    /// Diagonals ignore their orthogonal neighbors.
    Allow,
    /// Refused only when both orthogonal cells are blocked.
    NoSqueeze,
    /// Refused when either orthogonal cell is blocked.
    #[default]
    Forbid,
}

const DOWN: Step = Step::new(1, 0, 1.0);
const UP: Step = Step::new(-1, 0, 1.0);
const RIGHT: Step = Step::new(0, 1, 1.0);
const LEFT: Step = Step::new(0, -1, 1.0);

/// Neighbor offsets and step costs used to expand a cell.
///
/// Steps are tried in the order they were given, which fixes the order
/// neighbors enter the open set.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRule {
    steps: Vec<Step>,
    corners: CornerCutting,
}

impl MovementRule {
    /// Validates and builds a custom rule.
    ///
    /// Every step needs a non-zero offset, a finite positive cost, and
    /// must not repeat another step's offset.
    pub fn new(steps: Vec<Step>, corners: CornerCutting) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::InvalidConfiguration(
                "movement rule has no steps".to_string(),
            ));
        }

        let mut seen = FxHashSet::default();
        for step in &steps {
            if step.dr == 0 && step.dc == 0 {
                return Err(Error::InvalidConfiguration(
                    "movement step (0, 0) does not move".to_string(),
                ));
            }
            if !step.cost.is_finite() || step.cost <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "movement step ({}, {}) has cost {}; costs must be finite and positive",
                    step.dr, step.dc, step.cost
                )));
            }
            if !seen.insert((step.dr, step.dc)) {
                return Err(Error::InvalidConfiguration(format!(
                    "movement step ({}, {}) is listed twice",
                    step.dr, step.dc
                )));
            }
        }

        Ok(MovementRule { steps, corners })
    }

    /// Down, up, right, left at unit cost.
    pub fn four_way() -> Self {
        MovementRule {
            steps: vec![DOWN, UP, RIGHT, LEFT],
            corners: CornerCutting::Forbid,
        }
    }

    /// Four-way steps at cost 1 followed by diagonals at cost √2, with
    /// corner cutting forbidden.
    pub fn eight_way() -> Self {
        Self::eight_way_with(CornerCutting::Forbid)
    }

    pub fn eight_way_with(corners: CornerCutting) -> Self {
        MovementRule {
            steps: vec![
                DOWN,
                UP,
                RIGHT,
                LEFT,
                Step::new(1, 1, SQRT_2),
                Step::new(1, -1, SQRT_2),
                Step::new(-1, 1, SQRT_2),
                Step::new(-1, -1, SQRT_2),
            ],
            corners,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn corners(&self) -> CornerCutting {
        self.corners
    }

    /// Appends every legal move out of `from` to `buf` as `(cell, cost)`.
    pub fn neighbors(&self, grid: &Grid, from: Cell, buf: &mut Vec<(Cell, f64)>) {
        for step in &self.steps {
            let Some(to) = from.offset(step.dr, step.dc) else {
                continue;
            };
            if !grid.is_free(to) {
                continue;
            }
            if step.is_unit_diagonal() && !self.diagonal_allowed(grid, from, step) {
                continue;
            }
            buf.push((to, step.cost));
        }
    }

    /// Whether `from -> to` is a single legal move on `grid`.
    pub fn allows_move(&self, grid: &Grid, from: Cell, to: Cell) -> bool {
        let mut buf = Vec::with_capacity(self.steps.len());
        self.neighbors(grid, from, &mut buf);
        buf.iter().any(|&(cell, _)| cell == to)
    }

    /// Cost of the single move `from -> to`, if it is legal.
    pub fn step_cost(&self, grid: &Grid, from: Cell, to: Cell) -> Option<f64> {
        let mut buf = Vec::with_capacity(self.steps.len());
        self.neighbors(grid, from, &mut buf);
        buf.into_iter()
            .find(|&(cell, _)| cell == to)
            .map(|(_, cost)| cost)
    }

    fn diagonal_allowed(&self, grid: &Grid, from: Cell, step: &Step) -> bool {
        let vertical = from.offset(step.dr, 0).is_some_and(|c| grid.is_free(c));
        let horizontal = from.offset(0, step.dc).is_some_and(|c| grid.is_free(c));
        match self.corners {
            CornerCutting::Allow => true,
            CornerCutting::NoSqueeze => vertical || horizontal,
            CornerCutting::Forbid => vertical && horizontal,
        }
    }
}

impl Default for MovementRule {
    fn default() -> Self {
        Self::four_way()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rule: &MovementRule, grid: &Grid, from: Cell) -> Vec<Cell> {
        let mut buf = Vec::new();
        rule.neighbors(grid, from, &mut buf);
        buf.into_iter().map(|(c, _)| c).collect()
    }

    #[test]
    fn four_way_order_is_down_up_right_left() {
        let grid = Grid::new(3, 3);
        let got = cells(&MovementRule::four_way(), &grid, Cell::new(1, 1));
        assert_eq!(
            got,
            vec![Cell::new(2, 1), Cell::new(0, 1), Cell::new(1, 2), Cell::new(1, 0)]
        );
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let grid = Grid::with_blocked(2, 2, [Cell::new(1, 0)]).unwrap();
        let got = cells(&MovementRule::four_way(), &grid, Cell::new(0, 0));
        assert_eq!(got, vec![Cell::new(0, 1)]);
    }

    #[test]
    fn corner_policies_differ_on_a_single_wall() {
        // . #
        // . .
        let grid = Grid::with_blocked(2, 2, [Cell::new(0, 1)]).unwrap();
        let from = Cell::new(0, 0);
        let to = Cell::new(1, 1);

        assert!(MovementRule::eight_way_with(CornerCutting::Allow).allows_move(&grid, from, to));
        assert!(MovementRule::eight_way_with(CornerCutting::NoSqueeze).allows_move(&grid, from, to));
        assert!(!MovementRule::eight_way_with(CornerCutting::Forbid).allows_move(&grid, from, to));
    }

    #[test]
    fn no_squeeze_blocks_between_two_walls() {
        // . #
        // # .
        let grid = Grid::with_blocked(2, 2, [Cell::new(0, 1), Cell::new(1, 0)]).unwrap();
        let from = Cell::new(0, 0);
        let to = Cell::new(1, 1);

        assert!(MovementRule::eight_way_with(CornerCutting::Allow).allows_move(&grid, from, to));
        assert!(!MovementRule::eight_way_with(CornerCutting::NoSqueeze).allows_move(&grid, from, to));
    }

    #[test]
    fn diagonal_cost_is_sqrt_two() {
        let grid = Grid::new(2, 2);
        let cost = MovementRule::eight_way()
            .step_cost(&grid, Cell::new(0, 0), Cell::new(1, 1))
            .unwrap();
        assert!((cost - SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_steps() {
        let cases = [
            vec![],
            vec![Step::new(0, 0, 1.0)],
            vec![Step::new(1, 0, 0.0)],
            vec![Step::new(1, 0, -2.0)],
            vec![Step::new(1, 0, f64::NAN)],
            vec![Step::new(1, 0, f64::INFINITY)],
            vec![Step::new(1, 0, 1.0), Step::new(1, 0, 2.0)],
        ];
        for steps in cases {
            let err = MovementRule::new(steps.clone(), CornerCutting::Allow).unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfiguration(_)),
                "{:?} should be rejected",
                steps
            );
        }
    }

    #[test]
    fn custom_knight_moves() {
        let rule = MovementRule::new(
            vec![Step::new(2, 1, 3.0), Step::new(1, 2, 3.0)],
            CornerCutting::Allow,
        )
        .unwrap();
        let grid = Grid::new(3, 3);
        assert_eq!(cells(&rule, &grid, Cell::new(0, 0)), vec![Cell::new(2, 1), Cell::new(1, 2)]);
    }

    #[test]
    fn extreme_offsets_are_not_unit_diagonals() {
        assert!(!Step::new(isize::MIN, 1, 1.0).is_unit_diagonal());
        assert!(!Step::new(-1, isize::MIN, 1.0).is_unit_diagonal());
        assert!(Step::new(-1, 1, 1.0).is_unit_diagonal());
    }

    #[test]
    fn extreme_offset_lands_on_a_tall_grid() {
        let rule = MovementRule::new(vec![Step::new(isize::MIN, 1, 1.0)], CornerCutting::Forbid)
            .unwrap();
        let grid = Grid::new(usize::MAX, 2);
        let from = Cell::new(usize::MAX - 1, 0);
        let expected = Cell::new(usize::MAX - 1 - isize::MIN.unsigned_abs(), 1);
        assert_eq!(cells(&rule, &grid, from), vec![expected]);
    }
}

//! Randomized checks against the `pathfinding` crate's BFS and Dijkstra.

use std::f64::consts::SQRT_2;

use astar_grid::{Cell, CornerCutting, Distance, Grid, Heuristic, MovementRule, PathFinder, TieBreak};
use pathfinding::prelude::{bfs, dijkstra};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CASES: u64 = 300;

/// Fixed-point scale for Dijkstra's integer costs.
const SCALE: f64 = 1_000_000.0;

struct Case {
    grid: Grid,
    start: Cell,
    goal: Cell,
}

fn random_case(seed: u64) -> Option<Case> {
    let mut rng = StdRng::seed_from_u64(seed);
    let height = rng.gen_range(1..=9);
    let width = rng.gen_range(1..=9);
    let density = rng.gen_range(0.0..0.45);

    let mut grid = Grid::new(height, width);
    for row in 0..height {
        for col in 0..width {
            if rng.gen_bool(density) {
                grid.set_blocked(Cell::new(row, col), true).unwrap();
            }
        }
    }

    let free: Vec<Cell> = grid.free_cells().collect();
    if free.is_empty() {
        return None;
    }
    let start = free[rng.gen_range(0..free.len())];
    let goal = free[rng.gen_range(0..free.len())];
    Some(Case { grid, start, goal })
}

fn orthogonal_successors(grid: &Grid, cell: &Cell) -> Vec<Cell> {
    let mut out = Vec::new();
    if cell.row + 1 < grid.height() {
        out.push(Cell::new(cell.row + 1, cell.col));
    }
    if cell.row > 0 {
        out.push(Cell::new(cell.row - 1, cell.col));
    }
    if cell.col + 1 < grid.width() {
        out.push(Cell::new(cell.row, cell.col + 1));
    }
    if cell.col > 0 {
        out.push(Cell::new(cell.row, cell.col - 1));
    }
    out.retain(|&c| !grid.is_blocked(c));
    out
}

fn free_at(grid: &Grid, cell: Cell, dr: isize, dc: isize) -> Option<Cell> {
    let row = cell.row as isize + dr;
    let col = cell.col as isize + dc;
    if row < 0 || col < 0 || row >= grid.height() as isize || col >= grid.width() as isize {
        return None;
    }
    let next = Cell::new(row as usize, col as usize);
    (!grid.is_blocked(next)).then_some(next)
}

/// Cost of one eight-way move, worked out from the grid alone.
fn eight_way_move_cost(grid: &Grid, corners: CornerCutting, from: Cell, to: Cell) -> Option<f64> {
    let dr = to.row as isize - from.row as isize;
    let dc = to.col as isize - from.col as isize;
    if (dr, dc) == (0, 0) || dr.abs() > 1 || dc.abs() > 1 {
        return None;
    }
    free_at(grid, from, dr, dc)?;
    if dr == 0 || dc == 0 {
        return Some(1.0);
    }

    let vertical = free_at(grid, from, dr, 0).is_some();
    let horizontal = free_at(grid, from, 0, dc).is_some();
    let allowed = match corners {
        CornerCutting::Allow => true,
        CornerCutting::NoSqueeze => vertical || horizontal,
        CornerCutting::Forbid => vertical && horizontal,
    };
    allowed.then_some(SQRT_2)
}

fn eight_way_successors(grid: &Grid, corners: CornerCutting, cell: &Cell) -> Vec<(Cell, u64)> {
    let mut out = Vec::new();
    for dr in -1..=1 {
        for dc in -1..=1 {
            let Some(next) = free_at(grid, *cell, dr, dc) else {
                continue;
            };
            if let Some(cost) = eight_way_move_cost(grid, corners, *cell, next) {
                out.push((next, (cost * SCALE).round() as u64));
            }
        }
    }
    out
}

fn assert_valid_path<F>(case: &Case, cells: &[Cell], cost: f64, move_cost: F)
where
    F: Fn(Cell, Cell) -> Option<f64>,
{
    assert_eq!(cells.first(), Some(&case.start));
    assert_eq!(cells.last(), Some(&case.goal));

    let mut walked = 0.0;
    for pair in cells.windows(2) {
        let step = move_cost(pair[0], pair[1])
            .unwrap_or_else(|| panic!("illegal move {} -> {}", pair[0], pair[1]));
        walked += step;
    }
    assert!((walked - cost).abs() < 1e-9, "path cost {} but steps sum to {}", cost, walked);
}

#[test]
fn four_way_matches_breadth_first_search() {
    let rule = MovementRule::four_way();

    for seed in 0..CASES {
        let Some(case) = random_case(seed) else {
            continue;
        };

        for tie_break in [TieBreak::HigherG, TieBreak::Fifo] {
            let outcome = PathFinder::new(Distance::Manhattan, rule.clone())
                .with_tie_break(tie_break)
                .find_path(&case.grid, case.start, case.goal)
                .unwrap();
            let oracle = bfs(
                &case.start,
                |c| orthogonal_successors(&case.grid, c),
                |c| *c == case.goal,
            );

            match (outcome.path(), oracle) {
                (Some(path), Some(shortest)) => {
                    assert_eq!(path.len(), shortest.len(), "seed {}", seed);
                    assert_eq!(path.cost(), (shortest.len() - 1) as f64, "seed {}", seed);
                    assert_valid_path(&case, path.cells(), path.cost(), |a, b| {
                        orthogonal_successors(&case.grid, &a).contains(&b).then_some(1.0)
                    });
                }
                (None, None) => {}
                (ours, theirs) => panic!(
                    "seed {}: reachability disagrees (ours {:?}, bfs {:?})",
                    seed,
                    ours.map(|p| p.len()),
                    theirs.map(|p| p.len())
                ),
            }
        }
    }
}

fn check_eight_way<H: Heuristic>(corners: CornerCutting, heuristic: H) {
    let finder = PathFinder::new(heuristic, MovementRule::eight_way_with(corners));

    for seed in 0..CASES {
        let Some(case) = random_case(seed) else {
            continue;
        };

        let outcome = finder.find_path(&case.grid, case.start, case.goal).unwrap();
        let oracle = dijkstra(
            &case.start,
            |c| eight_way_successors(&case.grid, corners, c),
            |c| *c == case.goal,
        );

        match (outcome.path(), oracle) {
            (Some(path), Some((_, best))) => {
                let best = best as f64 / SCALE;
                assert!(
                    (path.cost() - best).abs() < 1e-4,
                    "seed {}: cost {} but optimum is {}",
                    seed,
                    path.cost(),
                    best
                );
                assert_valid_path(&case, path.cells(), path.cost(), |a, b| {
                    eight_way_move_cost(&case.grid, corners, a, b)
                });
            }
            (None, None) => {}
            (ours, theirs) => panic!(
                "seed {}: reachability disagrees (ours {:?}, dijkstra {:?})",
                seed,
                ours.map(|p| p.cost()),
                theirs.map(|(_, c)| c)
            ),
        }
    }
}

#[test]
fn eight_way_octile_is_optimal_for_every_corner_policy() {
    for corners in [CornerCutting::Allow, CornerCutting::NoSqueeze, CornerCutting::Forbid] {
        check_eight_way(corners, Distance::Octile);
    }
}

#[test]
fn eight_way_euclidean_and_chebyshev_are_optimal() {
    check_eight_way(CornerCutting::Forbid, Distance::Euclidean);
    check_eight_way(CornerCutting::Allow, Distance::Chebyshev);
}

#[test]
fn paths_never_revisit_a_cell() {
    for seed in 0..CASES {
        let Some(case) = random_case(seed) else {
            continue;
        };
        let outcome = PathFinder::new(Distance::Octile, MovementRule::eight_way())
            .find_path(&case.grid, case.start, case.goal)
            .unwrap();
        if let Some(path) = outcome.path() {
            let mut seen: Vec<Cell> = path.cells().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), path.len(), "seed {}", seed);
        }
    }
}

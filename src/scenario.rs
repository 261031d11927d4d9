use std::fs;
use std::path::Path as FsPath;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};

/// A grid with optional start and goal markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub grid: Grid,
    pub start: Option<Cell>,
    pub goal: Option<Cell>,
}

impl Scenario {
    /// Reads a text grid from `path`. See [`Scenario::from_str`] for the format.
    pub fn load(path: &FsPath) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let scenario: Scenario = text.parse()?;
        debug!(
            path = %path.display(),
            height = scenario.grid.height(),
            width = scenario.grid.width(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    /// Builds a reproducible random scenario.
    ///
    /// The start is drawn from the top-left quadrant and the goal from the
    /// bottom-right one. Up to `walls` distinct cells are then blocked,
    /// never covering either endpoint. Placement gives up after
    /// `walls * 3` attempts (saturating), so dense requests may yield fewer walls.
    pub fn random(height: usize, width: usize, walls: usize, seed: u64) -> Result<Self> {
        if height < 2 || width < 2 {
            return Err(Error::InvalidGrid(format!(
                "random grids need at least 2x2 cells, got {}x{}",
                height, width
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let start = Cell::new(rng.gen_range(0..height / 2), rng.gen_range(0..width / 2));
        let goal = Cell::new(
            rng.gen_range(height / 2..height),
            rng.gen_range(width / 2..width),
        );

        let mut grid = Grid::new(height, width);
        let mut placed = 0;
        let mut attempts = 0;
        while placed < walls && attempts < walls.saturating_mul(3) {
            let cell = Cell::new(rng.gen_range(0..height), rng.gen_range(0..width));
            if cell != start && cell != goal && !grid.is_blocked(cell) {
                grid.set_blocked(cell, true)?;
                placed += 1;
            }
            attempts += 1;
        }

        debug!(seed, %start, %goal, walls = placed, "generated random scenario");
        Ok(Scenario {
            grid,
            start: Some(start),
            goal: Some(goal),
        })
    }
}

/// Parses one row per line: `.` or `0` free, `#` or `1` blocked, `S` start,
/// `G` goal. Spaces between cells and blank lines are ignored.
impl FromStr for Scenario {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut blocked = Vec::new();
        let mut start = None;
        let mut goal = None;
        let mut width = None;
        let mut height = 0;

        for (line_no, line) in text.lines().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }

            match width {
                None => width = Some(symbols.len()),
                Some(w) if w != symbols.len() => {
                    return Err(Error::InvalidGrid(format!(
                        "line {} has {} cells, expected {}",
                        line_no + 1,
                        symbols.len(),
                        w
                    )));
                }
                Some(_) => {}
            }

            let row = height;
            for (col, symbol) in symbols.into_iter().enumerate() {
                let cell = Cell::new(row, col);
                match symbol {
                    '.' | '0' => {}
                    '#' | '1' => blocked.push(cell),
                    'S' | 's' => set_marker(&mut start, cell, "start")?,
                    'G' | 'g' => set_marker(&mut goal, cell, "goal")?,
                    other => {
                        return Err(Error::InvalidGrid(format!(
                            "unexpected symbol {:?} at line {}, column {}",
                            other,
                            line_no + 1,
                            col + 1
                        )));
                    }
                }
            }
            height += 1;
        }

        let Some(width) = width else {
            return Err(Error::InvalidGrid("grid has no rows".to_string()));
        };

        Ok(Scenario {
            grid: Grid::with_blocked(height, width, blocked)?,
            start,
            goal,
        })
    }
}

fn set_marker(slot: &mut Option<Cell>, cell: Cell, name: &str) -> Result<()> {
    if let Some(previous) = slot {
        return Err(Error::InvalidGrid(format!(
            "{} marked twice, at {} and {}",
            name, previous, cell
        )));
    }
    *slot = Some(cell);
    Ok(())
}

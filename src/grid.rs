use std::fmt;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// A grid position addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Returns the cell shifted by `(dr, dc)`, or `None` if either
    /// coordinate would become negative.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Cell> {
        Some(Cell {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed-size grid with a set of blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    blocked: FxHashSet<Cell>,
}

impl Grid {
    /// Creates a grid with every cell free.
    pub fn new(height: usize, width: usize) -> Self {
        Grid {
            height,
            width,
            blocked: FxHashSet::default(),
        }
    }

    /// Creates a grid with the given cells blocked.
    ///
    /// Fails with [`Error::InvalidGrid`] if any blocked cell lies outside
    /// the grid.
    pub fn with_blocked<I>(height: usize, width: usize, blocked: I) -> Result<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Grid::new(height, width);
        for cell in blocked {
            grid.set_blocked(cell, true)?;
        }
        Ok(grid)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Marks `cell` as blocked or free.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> Result<()> {
        if !self.in_bounds(cell) {
            return Err(Error::InvalidGrid(format!(
                "cell {} is outside the {}x{} grid",
                cell, self.height, self.width
            )));
        }
        if blocked {
            self.blocked.insert(cell);
        } else {
            self.blocked.remove(&cell);
        }
        Ok(())
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    /// In bounds and not blocked.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_blocked(cell)
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Iterates over every free cell in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
            .filter(move |&cell| !self.is_blocked(cell))
    }

    /// Renders the grid with `S`, `G`, `*` (path), `#` (blocked) and `.`.
    pub fn render(&self, start: Option<Cell>, goal: Option<Cell>, path: &[Cell]) -> String {
        let on_path: FxHashSet<Cell> = path.iter().copied().collect();
        let mut out = String::with_capacity(self.height * (self.width * 2 + 1));

        for row in 0..self.height {
            let line: Vec<&str> = (0..self.width)
                .map(|col| {
                    let cell = Cell::new(row, col);
                    if Some(cell) == start {
                        "S"
                    } else if Some(cell) == goal {
                        "G"
                    } else if on_path.contains(&cell) {
                        "*"
                    } else if self.is_blocked(cell) {
                        "#"
                    } else {
                        "."
                    }
                })
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

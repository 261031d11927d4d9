use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::algorithms::open_set::TieBreak;
use crate::error::{Error, Result};
use crate::grid::Cell;
use crate::heuristic::Distance;
use crate::movement::{CornerCutting, MovementRule};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementArg {
    Four,
    Eight,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerArg {
    Allow,
    NoSqueeze,
    Forbid,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicArg {
    Manhattan,
    Euclidean,
    Octile,
    Chebyshev,
    Zero,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreakArg {
    HigherG,
    Fifo,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "A* shortest paths on blocked/free grids", long_about = None)]
pub struct Config {
    /// Text grid to load ('.' free, '#' blocked, 'S' start, 'G' goal).
    #[arg(long)]
    pub grid_file: Option<PathBuf>,

    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    #[arg(long, default_value_t = 12)]
    pub cols: usize,

    /// Walls placed on a random grid.
    #[arg(long, default_value_t = 30)]
    pub walls: usize,

    /// Seed for random grids; drawn at random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as "row,col".
    #[arg(long, value_parser = parse_cell)]
    pub start: Option<Cell>,

    /// Goal cell as "row,col".
    #[arg(long, value_parser = parse_cell)]
    pub goal: Option<Cell>,

    #[arg(long, value_enum, default_value_t = MovementArg::Four)]
    pub movement: MovementArg,

    /// Corner cutting for eight-way movement; defaults to forbid.
    #[arg(long, value_enum)]
    pub corners: Option<CornerArg>,

    /// Defaults to manhattan for four-way and octile for eight-way movement.
    #[arg(long, value_enum)]
    pub heuristic: Option<HeuristicArg>,

    #[arg(long, value_enum, default_value_t = TieBreakArg::HigherG)]
    pub tie_break: TieBreakArg,

    /// Run this many random scenarios and print a summary.
    #[arg(long)]
    pub runs: Option<usize>,

    /// Skip the grid rendering.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    /// Fails when `--corners` is given without diagonal moves to apply it to.
    pub fn movement_rule(&self) -> Result<MovementRule> {
        match (self.movement, self.corners) {
            (MovementArg::Four, None) => Ok(MovementRule::four_way()),
            (MovementArg::Four, Some(_)) => Err(Error::InvalidConfiguration(
                "--corners only applies to --movement eight".to_string(),
            )),
            (MovementArg::Eight, corners) => Ok(MovementRule::eight_way_with(match corners {
                Some(CornerArg::Allow) => CornerCutting::Allow,
                Some(CornerArg::NoSqueeze) => CornerCutting::NoSqueeze,
                Some(CornerArg::Forbid) | None => CornerCutting::Forbid,
            })),
        }
    }

    pub fn distance(&self) -> Distance {
        match (self.heuristic, self.movement) {
            (Some(HeuristicArg::Manhattan), _) => Distance::Manhattan,
            (Some(HeuristicArg::Euclidean), _) => Distance::Euclidean,
            (Some(HeuristicArg::Octile), _) => Distance::Octile,
            (Some(HeuristicArg::Chebyshev), _) => Distance::Chebyshev,
            (Some(HeuristicArg::Zero), _) => Distance::Zero,
            (None, MovementArg::Four) => Distance::Manhattan,
            (None, MovementArg::Eight) => Distance::Octile,
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        match self.tie_break {
            TieBreakArg::HigherG => TieBreak::HigherG,
            TieBreakArg::Fifo => TieBreak::Fifo,
        }
    }
}

fn parse_cell(value: &str) -> std::result::Result<Cell, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"row,col\", got {:?}", value))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row {:?}: {}", row, e))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column {:?}: {}", col, e))?;
    Ok(Cell::new(row, col))
}
